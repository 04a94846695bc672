//! Rule 6: symmetric ring systems whose ligands stay tied after Rule 5.
//!
//! Each tied ligand in turn is promoted to reference and the ranking is
//! rerun with Rule 6 preferring it. When every promotion yields the same
//! handedness the center is chiral.

use petgraph::graph::NodeIndex;
use tracing::debug;

use super::config::Rule6Mode;
use super::digraph::{Digraph, SortMode, ROOT};
use super::engine::{chirality_label, ranked_ligands, run_rules, Env};
use super::error::CipError;
use super::label::{CipDescriptor, CipLabel, Rule};

pub(crate) fn resolve(
    tree: &mut Digraph,
    env: &Env,
    center: NodeIndex,
) -> Result<Option<CipDescriptor>, CipError> {
    if tree.root_duplicates <= 2 {
        return Ok(None);
    }
    tree.sort_node(env, ROOT, Rule::R5, SortMode::Full)?;
    let promoted = tied_ligands(tree);
    if promoted.is_empty() {
        return Ok(None);
    }

    let mut labels: Vec<CipLabel> = Vec::new();
    for atom in promoted {
        let mut trial = tree.clone();
        trial.rule6_ref = Some(atom);
        let ranked = match env.config.rule6 {
            Rule6Mode::Simplified => {
                trial.sort_node(env, ROOT, Rule::R6, SortMode::Full)?;
                trial.is_fully_ranked(ROOT)
            }
            Rule6Mode::Full => {
                trial.clear_auxiliary();
                trial.reset_rankings();
                run_rules(&mut trial, env, true, |t| t.is_fully_ranked(ROOT))?.is_some()
            }
        };
        // A promotion that leaves ties (three equal ligands) casts no vote.
        if !ranked {
            debug!(
                target: "cipcrab::cip",
                atom = center.index(),
                promoted = atom.index(),
                "rule 6 promotion left ties"
            );
            continue;
        }
        let Some(ligands) = ranked_ligands(&trial, center) else {
            continue;
        };
        if let Some(handedness) = env.oracle.tetrahedral(center, ligands) {
            labels.push(chirality_label(handedness, false));
        }
    }

    let Some(&first) = labels.first() else {
        return Ok(None);
    };
    if labels.iter().all(|&l| l == first) {
        return Ok(Some(CipDescriptor::new(first, Rule::R6)));
    }
    debug!(
        target: "cipcrab::cip",
        atom = center.index(),
        promotions = labels.len(),
        "rule 6 promotions disagree"
    );
    Ok(match env.config.rule6 {
        Rule6Mode::Simplified => None,
        Rule6Mode::Full => {
            let pseudo = match first {
                CipLabel::R => CipLabel::PseudoR,
                _ => CipLabel::PseudoS,
            };
            Some(CipDescriptor::new(pseudo, Rule::R6))
        }
    })
}

/// Atoms behind root substituents that share their priority with another.
fn tied_ligands(tree: &Digraph) -> Vec<NodeIndex> {
    let root = tree.node(ROOT);
    root.subs
        .iter()
        .zip(&root.priorities)
        .filter(|&(_, p)| root.priorities.iter().filter(|&q| q == p).count() > 1)
        .filter_map(|(&sub, _)| tree.node(sub).real_atom())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cip::config::CipConfig;
    use crate::cip::perception::Perception;
    use crate::cip::topology::Topology;
    use crate::mol::{AtomId, TetrahedralStereo};
    use crate::{Atom, Bond, Mol};

    /// 1-Chlorobicyclo[2.2.2]octane with C1 annotated. Returns the molecule,
    /// C1 and the first atom of each bridge.
    fn chloro_cage() -> (Mol<Atom, Bond>, NodeIndex, [NodeIndex; 3]) {
        let mut mol = Mol::<Atom, Bond>::new();
        let c1 = mol.add_atom(Atom::new(6, 0));
        let c4 = mol.add_atom(Atom::new(6, 1));
        let cl = mol.add_atom(Atom::new(17, 0));
        mol.add_bond(c1, cl, Bond::default());
        let mut bridges = [c1; 3];
        for first in &mut bridges {
            let a = mol.add_atom(Atom::new(6, 2));
            let b = mol.add_atom(Atom::new(6, 2));
            mol.add_bond(c1, a, Bond::default());
            mol.add_bond(a, b, Bond::default());
            mol.add_bond(b, c4, Bond::default());
            *first = a;
        }
        mol.add_tetrahedral_stereo(TetrahedralStereo {
            center: c1,
            above: [
                AtomId::Node(cl),
                AtomId::Node(bridges[0]),
                AtomId::Node(bridges[1]),
                AtomId::Node(bridges[2]),
            ],
        });
        (mol, c1, bridges)
    }

    #[test]
    fn cage_promotions_leave_ties() {
        let (mol, c1, bridges) = chloro_cage();
        let topo = Topology::from_mol(&mol);
        let perception = Perception::from_mol(&mol);
        for mode in [Rule6Mode::Simplified, Rule6Mode::Full] {
            let config = CipConfig::default().with_rule6(mode);
            let env = Env::new(&topo, &perception, &mol, &config);
            let mut tree = Digraph::for_root(&env, c1).unwrap().unwrap();
            let done = run_rules(&mut tree, &env, true, |t| t.is_fully_ranked(ROOT)).unwrap();
            assert_eq!(done, None);
            assert!(tree.root_duplicates > 2);
            assert_eq!(tree.node(ROOT).priorities, vec![0, 1, 1, 1]);
            let mut tied = tied_ligands(&tree);
            tied.sort();
            assert_eq!(tied, bridges);
            assert_eq!(resolve(&mut tree, &env, c1), Ok(None), "{mode:?}");
        }
    }

    #[test]
    fn needs_ring_closures_to_root() {
        // A plain acyclic tie never reaches the promotion step.
        let mut mol = Mol::<Atom, Bond>::new();
        let c = mol.add_atom(Atom::new(6, 1));
        let o = mol.add_atom(Atom::new(8, 1));
        mol.add_bond(c, o, Bond::default());
        for _ in 0..2 {
            let m = mol.add_atom(Atom::new(6, 3));
            mol.add_bond(c, m, Bond::default());
        }
        let topo = Topology::from_mol(&mol);
        let perception = Perception::from_mol(&mol);
        let config = CipConfig::default();
        let env = Env::new(&topo, &perception, &mol, &config);
        let mut tree = Digraph::for_root(&env, c).unwrap().unwrap();
        assert_eq!(resolve(&mut tree, &env, c), Ok(None));
    }

    #[test]
    fn tied_ligands_lists_each_tied_atom() {
        let mut mol = Mol::<Atom, Bond>::new();
        let c = mol.add_atom(Atom::new(6, 1));
        let o = mol.add_atom(Atom::new(8, 1));
        mol.add_bond(c, o, Bond::default());
        let methyls: Vec<_> = (0..2)
            .map(|_| {
                let m = mol.add_atom(Atom::new(6, 3));
                mol.add_bond(c, m, Bond::default());
                m
            })
            .collect();
        let topo = Topology::from_mol(&mol);
        let perception = Perception::from_mol(&mol);
        let config = CipConfig::default();
        let env = Env::new(&topo, &perception, &mol, &config);
        let mut tree = Digraph::for_root(&env, c).unwrap().unwrap();
        tree.sort_node(&env, ROOT, Rule::R1a, SortMode::Full).unwrap();
        let mut tied = tied_ligands(&tree);
        tied.sort();
        assert_eq!(tied, methyls);
    }
}
