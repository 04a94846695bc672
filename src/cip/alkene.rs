//! Double bonds, cumulenes and chiral axes.
//!
//! A run of cumulated double bonds is one stereogenic unit. With an odd
//! number of double bonds the ends are coplanar and the unit is labelled
//! E/Z on its central bond. With an even number the ends are twisted and the
//! unit is labelled M/P on its central atom.

use std::collections::HashSet;

use petgraph::graph::{EdgeIndex, NodeIndex};

use super::digraph::{Digraph, ROOT};
use super::engine::{run_rules, Env};
use super::error::CipError;
use super::label::{CipDescriptor, CipLabel, Rule};
use super::oracle::BondSide;
use super::topology::Topology;
use crate::mol::{AtomId, Torsion};

/// Where a descriptor is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum StereoUnit {
    Bond(EdgeIndex),
    Atom(NodeIndex),
}

/// Atoms of a cumulated double-bond chain, end to end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Chain {
    pub atoms: Vec<NodeIndex>,
}

impl Chain {
    pub fn double_bonds(&self) -> usize {
        self.atoms.len() - 1
    }

    pub fn is_planar(&self) -> bool {
        self.double_bonds() % 2 == 1
    }

    pub fn ends(&self) -> (NodeIndex, NodeIndex) {
        (self.atoms[0], self.atoms[self.atoms.len() - 1])
    }

    /// Chain atoms next to each end.
    pub fn inner(&self) -> (NodeIndex, NodeIndex) {
        (self.atoms[1], self.atoms[self.atoms.len() - 2])
    }

    pub fn unit(&self, topology: &Topology) -> Option<StereoUnit> {
        let mid = self.double_bonds() / 2;
        if self.is_planar() {
            let n = topology.neighbor(self.atoms[mid], self.atoms[mid + 1])?;
            Some(StereoUnit::Bond(n.bond))
        } else {
            Some(StereoUnit::Atom(self.atoms[mid]))
        }
    }
}

/// The cumulene chain `bond` belongs to. `None` when the bond is not an
/// alkene-type double bond or the chain closes on itself.
pub(crate) fn chain_through(topology: &Topology, bond: EdgeIndex) -> Option<Chain> {
    let (a, b, order) = topology.bond(bond)?;
    if !topology.is_alkene_bond(a, b, order) {
        return None;
    }
    let mut seen = HashSet::from([a, b]);
    let before = extend(topology, a, b, &mut seen)?;
    let after = extend(topology, b, a, &mut seen)?;
    let mut atoms: Vec<NodeIndex> = before.into_iter().rev().collect();
    atoms.push(a);
    atoms.push(b);
    atoms.extend(after);
    Some(Chain { atoms })
}

/// Cumulated atoms beyond `from`, walking away from `prev`.
fn extend(
    topology: &Topology,
    from: NodeIndex,
    prev: NodeIndex,
    seen: &mut HashSet<NodeIndex>,
) -> Option<Vec<NodeIndex>> {
    let mut out = Vec::new();
    let (mut prev, mut cur) = (prev, from);
    while topology.ligand_count(cur) == 2 {
        let Some(next) = topology.double_bond_partners(cur).find(|&n| n != prev) else {
            break;
        };
        if !seen.insert(next) {
            return None;
        }
        out.push(next);
        prev = cur;
        cur = next;
    }
    Some(out)
}

/// The higher-ranked ligand on the root of `tree` that is not part of the
/// chain, with the rule that split the two candidates. Duplicates never
/// count as candidates.
pub(crate) fn end_winner(
    tree: &mut Digraph,
    env: &Env,
    inner: NodeIndex,
    auxiliary: bool,
) -> Result<Option<(AtomId, Rule)>, CipError> {
    let root_atom = tree.root_atom;
    let candidates: Vec<usize> = tree
        .node(ROOT)
        .subs
        .iter()
        .copied()
        .filter(|&s| {
            let node = tree.node(s);
            !node.duplicate && node.atom != Some(AtomId::Node(inner))
        })
        .collect();
    let &[x, y] = candidates.as_slice() else {
        return Ok(None);
    };
    let split = |t: &Digraph| t.priority_of(ROOT, x) != t.priority_of(ROOT, y);
    let Some(rule) = run_rules(tree, env, auxiliary, split)? else {
        return Ok(None);
    };
    let winner = if tree.priority_of(ROOT, x) < tree.priority_of(ROOT, y) {
        x
    } else {
        y
    };
    let atom = tree.node(winner).atom.unwrap_or(AtomId::LonePair(root_atom));
    Ok(Some((atom, rule)))
}

pub(crate) fn planar_label(side: BondSide, pseudo: bool) -> CipLabel {
    match (side, pseudo) {
        (BondSide::Cis, false) => CipLabel::Z,
        (BondSide::Trans, false) => CipLabel::E,
        (BondSide::Cis, true) => CipLabel::SeqCis,
        (BondSide::Trans, true) => CipLabel::SeqTrans,
    }
}

pub(crate) fn axial_label(torsion: Torsion, pseudo: bool) -> CipLabel {
    match (torsion, pseudo) {
        (Torsion::Positive, false) => CipLabel::P,
        (Torsion::Negative, false) => CipLabel::M,
        (Torsion::Positive, true) => CipLabel::PseudoP,
        (Torsion::Negative, true) => CipLabel::PseudoM,
    }
}

/// Label for a chain given the winning ligand on each end.
pub(crate) fn chain_label(
    env: &Env,
    chain: &Chain,
    refs: [AtomId; 2],
    rule: Rule,
) -> Option<CipLabel> {
    let pseudo = rule == Rule::R5;
    if chain.is_planar() {
        let side = env.oracle.planar(chain.ends(), refs)?;
        Some(planar_label(side, pseudo))
    } else {
        let torsion = env.oracle.axial(chain.ends(), refs)?;
        Some(axial_label(torsion, pseudo))
    }
}

/// The cumulene chain through `bond` and the unit its descriptor is
/// reported on.
pub(crate) fn stereo_unit(
    env: &Env,
    bond: EdgeIndex,
) -> Result<Option<(Chain, StereoUnit)>, CipError> {
    if env.topology.bond(bond).is_none() {
        return Err(CipError::UnknownBond(bond.index()));
    }
    let Some(chain) = chain_through(env.topology, bond) else {
        return Ok(None);
    };
    Ok(chain.unit(env.topology).map(|unit| (chain, unit)))
}

/// E/Z or M/P for `chain`, `None` when an end has two equal ligands, the
/// central bond is in a small ring or joins two aromatic atoms, or the
/// geometry is unknown.
pub(crate) fn descriptor(
    env: &Env,
    chain: &Chain,
    unit: StereoUnit,
) -> Result<Option<CipDescriptor>, CipError> {
    if let StereoUnit::Bond(central) = unit {
        if env.perception.in_small_ring(central) {
            return Ok(None);
        }
        let aromatic = env
            .topology
            .bond(central)
            .is_some_and(|(a, b, _)| env.perception.is_aromatic_bond(a, b));
        if aromatic {
            return Ok(None);
        }
    }
    let (end_a, end_b) = chain.ends();
    let (inner_a, inner_b) = chain.inner();
    let Some((ref_a, rule_a)) = winner_at(env, end_a, inner_a)? else {
        return Ok(None);
    };
    let Some((ref_b, rule_b)) = winner_at(env, end_b, inner_b)? else {
        return Ok(None);
    };
    let rule = rule_a.max(rule_b);
    Ok(chain_label(env, chain, [ref_a, ref_b], rule).map(|label| CipDescriptor::new(label, rule)))
}

fn winner_at(
    env: &Env,
    end: NodeIndex,
    inner: NodeIndex,
) -> Result<Option<(AtomId, Rule)>, CipError> {
    match Digraph::for_root(env, end)? {
        Some(mut tree) => end_winner(&mut tree, env, inner, true),
        None => Ok(None),
    }
}

/// M/P for a hindered single bond between two atropisomeric atoms.
pub(crate) fn atropisomer(env: &Env, bond: EdgeIndex) -> Result<Option<CipDescriptor>, CipError> {
    let Some((a, b, order)) = env.topology.bond(bond) else {
        return Err(CipError::UnknownBond(bond.index()));
    };
    if order != 1 || !env.perception.is_atropisomeric(a, b) {
        return Ok(None);
    }
    let Some((ref_a, rule_a)) = winner_at(env, a, b)? else {
        return Ok(None);
    };
    let Some((ref_b, rule_b)) = winner_at(env, b, a)? else {
        return Ok(None);
    };
    let rule = rule_a.max(rule_b);
    let Some(torsion) = env.oracle.axial((a, b), [ref_a, ref_b]) else {
        return Ok(None);
    };
    Ok(Some(CipDescriptor::new(axial_label(torsion, rule == Rule::R5), rule)))
}
