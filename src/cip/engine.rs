use std::collections::{HashMap, HashSet};

use petgraph::graph::NodeIndex;
use tracing::{debug, warn};

use super::alkene::{self, StereoUnit};
use super::auxiliary;
use super::config::CipConfig;
use super::digraph::{Digraph, SortMode, ROOT};
use super::error::CipError;
use super::label::{CipDescriptor, CipLabel, Rule};
use super::oracle::{Handedness, StereoOracle};
use super::perception::Perception;
use super::rule6;
use super::topology::Topology;
use super::CipResults;
use crate::mol::AtomId;

/// Shared, read-only state for one labelling run.
pub(crate) struct Env<'a> {
    pub topology: &'a Topology,
    pub perception: &'a Perception,
    pub oracle: &'a dyn StereoOracle,
    pub config: &'a CipConfig,
    /// Active rules in application order.
    pub rules: Vec<Rule>,
    /// Atoms that receive auxiliary descriptors inside a digraph. Taken from
    /// the skeleton, not from the caller's perception, so a narrowed
    /// perception still sees every stereocenter below the root.
    pub candidates: HashSet<NodeIndex>,
}

impl<'a> Env<'a> {
    pub fn new(
        topology: &'a Topology,
        perception: &'a Perception,
        oracle: &'a dyn StereoOracle,
        config: &'a CipConfig,
    ) -> Self {
        let rules = Rule::ALL
            .into_iter()
            .filter(|&rule| rule != Rule::R2 || topology.has_isotopes())
            .collect();
        Self {
            topology,
            perception,
            oracle,
            config,
            rules,
            candidates: (0..topology.atom_count())
                .map(NodeIndex::new)
                .filter(|&atom| topology.is_tetrahedral_candidate(atom))
                .collect(),
        }
    }
}

/// Applies the sequence rules to the root of `tree` until `done` holds.
///
/// Returns the rule that completed the ranking, or `None` if every rule ran
/// without satisfying `done`. Rule 6 only runs once a reference atom has
/// been promoted.
pub(crate) fn run_rules(
    tree: &mut Digraph,
    env: &Env,
    auxiliary: bool,
    done: impl Fn(&Digraph) -> bool,
) -> Result<Option<Rule>, CipError> {
    let mut has_stereo = None;
    for &rule in &env.rules {
        if rule == Rule::R6 && tree.rule6_ref.is_none() {
            break;
        }
        if rule == Rule::R3 && auxiliary {
            auxiliary::generate(tree, env)?;
        }
        if matches!(rule, Rule::R4a | Rule::R4b | Rule::R4c | Rule::R5)
            && !*has_stereo.get_or_insert_with(|| tree.has_stereo())
        {
            continue;
        }
        if rule.presorts() {
            tree.presort(env, rule)?;
        }
        tree.sort_node(env, ROOT, rule, SortMode::Full)?;
        if done(tree) {
            debug!(
                target: "cipcrab::cip",
                atom = tree.root_atom.index(),
                rule = %rule,
                nodes = tree.nodes.len(),
                "ranking complete"
            );
            return Ok(Some(rule));
        }
    }
    Ok(None)
}

/// Molecule atoms behind the root's substituents in priority order, with
/// phantoms standing for the lone pair.
pub(crate) fn ranked_ligands(tree: &Digraph, center: NodeIndex) -> Option<[AtomId; 4]> {
    let subs = &tree.node(ROOT).subs;
    if subs.len() != 4 {
        return None;
    }
    let mut out = [AtomId::LonePair(center); 4];
    for (slot, &sub) in out.iter_mut().zip(subs) {
        let node = tree.node(sub);
        if node.duplicate {
            return None;
        }
        if let Some(atom) = node.atom {
            *slot = atom;
        }
    }
    Some(out)
}

pub(crate) fn chirality_label(handedness: Handedness, pseudo: bool) -> CipLabel {
    match (handedness, pseudo) {
        (Handedness::Clockwise, false) => CipLabel::R,
        (Handedness::CounterClockwise, false) => CipLabel::S,
        (Handedness::Clockwise, true) => CipLabel::PseudoR,
        (Handedness::CounterClockwise, true) => CipLabel::PseudoS,
    }
}

/// Descriptor for a fully ranked tree rooted at `center`.
pub(crate) fn tetrahedral_descriptor(
    tree: &Digraph,
    env: &Env,
    center: NodeIndex,
    rule: Rule,
) -> Option<CipDescriptor> {
    let ligands = ranked_ligands(tree, center)?;
    let handedness = env.oracle.tetrahedral(center, ligands)?;
    let pseudo = rule == Rule::R5 && !tree.rule5_pseudo_exempt;
    Some(CipDescriptor::new(chirality_label(handedness, pseudo), rule))
}

/// R/S (or r/s) for a tetrahedral center, `None` when it is not
/// stereogenic or its geometry is unknown.
pub(crate) fn center_descriptor(
    env: &Env,
    atom: NodeIndex,
) -> Result<Option<CipDescriptor>, CipError> {
    if !env.topology.contains(atom) {
        return Err(CipError::UnknownAtom(atom.index()));
    }
    if !env.topology.is_tetrahedral_candidate(atom) {
        return Ok(None);
    }
    let Some(mut tree) = Digraph::for_root(env, atom)? else {
        return Ok(None);
    };
    match run_rules(&mut tree, env, true, |t| t.is_fully_ranked(ROOT))? {
        Some(rule) => Ok(tetrahedral_descriptor(&tree, env, atom, rule)),
        None => rule6::resolve(&mut tree, env, atom),
    }
}

/// Labels every candidate atom and bond in `env.perception`.
///
/// Failures on single units are logged and reported as ambiguous; they never
/// abort the run.
pub(crate) fn assign_all(env: &Env) -> CipResults {
    let mut atoms = HashMap::new();
    let mut bonds = HashMap::new();

    for &atom in &env.perception.chiral_atoms {
        match center_descriptor(env, atom) {
            Ok(Some(descriptor)) => {
                atoms.insert(atom, descriptor);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(target: "cipcrab::cip", error = %e, atom = atom.index(), "stereocenter left ambiguous");
                atoms.insert(atom, CipDescriptor::ambiguous());
            }
        }
    }

    let mut seen = HashSet::new();
    for &bond in &env.perception.chiral_bonds {
        let (chain, unit) = match alkene::stereo_unit(env, bond) {
            Ok(Some(found)) => found,
            Ok(None) => continue,
            Err(e) => {
                warn!(target: "cipcrab::cip", error = %e, bond = bond.index(), "double bond left ambiguous");
                bonds.insert(bond, CipDescriptor::ambiguous());
                continue;
            }
        };
        if !seen.insert(unit) {
            continue;
        }
        let descriptor = match alkene::descriptor(env, &chain, unit) {
            Ok(Some(descriptor)) => descriptor,
            Ok(None) => continue,
            Err(e) => {
                warn!(target: "cipcrab::cip", error = %e, bond = bond.index(), "double bond left ambiguous");
                CipDescriptor::ambiguous()
            }
        };
        match unit {
            StereoUnit::Bond(e) => bonds.insert(e, descriptor),
            StereoUnit::Atom(a) => atoms.insert(a, descriptor),
        };
    }

    if !env.perception.atropisomeric.is_empty() {
        for (bond, _, _) in env.topology.single_bonds() {
            match alkene::atropisomer(env, bond) {
                Ok(Some(descriptor)) => {
                    bonds.insert(bond, descriptor);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(target: "cipcrab::cip", error = %e, bond = bond.index(), "chiral axis left ambiguous");
                    bonds.insert(bond, CipDescriptor::ambiguous());
                }
            }
        }
    }

    let helicenes = [
        (&env.perception.helicene_m, CipLabel::M),
        (&env.perception.helicene_p, CipLabel::P),
    ];
    for (set, label) in helicenes {
        for &atom in set {
            atoms.insert(atom, CipDescriptor { label, rule: None });
        }
    }

    CipResults { atoms, bonds }
}
