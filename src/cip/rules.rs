//! Single-node comparisons for the sequence rules that look at one digraph
//! node at a time. Rules 4b and 5 compare whole ligands and live in
//! [`super::mata`].

use std::cmp::Ordering;

use super::digraph::{CipNode, Digraph, NodeId};
use super::label::{AuxChirality, AuxEz, Rule};

/// Which side of a comparison has priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Winner {
    A,
    B,
    Tie,
}

impl Winner {
    /// `Greater` means `a` has priority.
    pub fn from_ordering(ord: Ordering) -> Self {
        match ord {
            Ordering::Greater => Winner::A,
            Ordering::Less => Winner::B,
            Ordering::Equal => Winner::Tie,
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Winner::A => Winner::B,
            Winner::B => Winner::A,
            Winner::Tie => Winner::Tie,
        }
    }

    pub fn is_tie(self) -> bool {
        self == Winner::Tie
    }
}

/// A comparison result together with the sphere it was decided at. Shallow
/// differences beat deep ones when several branches disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Outcome {
    pub winner: Winner,
    pub sphere: usize,
}

impl Outcome {
    pub fn tie() -> Self {
        Self {
            winner: Winner::Tie,
            sphere: usize::MAX,
        }
    }

    pub fn at(winner: Winner, sphere: usize) -> Self {
        if winner.is_tie() {
            Self::tie()
        } else {
            Self { winner, sphere }
        }
    }
}

/// Compares nodes `a` and `b` under `rule` without looking at their
/// substituents.
pub(crate) fn compare(tree: &Digraph, rule: Rule, a: NodeId, b: NodeId) -> Winner {
    let (na, nb) = (tree.node(a), tree.node(b));
    match (na.is_phantom(), nb.is_phantom()) {
        (true, true) => return Winner::Tie,
        (true, false) => return Winner::B,
        (false, true) => return Winner::A,
        (false, false) => {}
    }
    match rule {
        Rule::R1a => Winner::from_ordering(na.element.total_cmp(&nb.element)),
        Rule::R1b => {
            if na.duplicate && nb.duplicate {
                Winner::from_ordering(nb.root_distance.cmp(&na.root_distance))
            } else {
                Winner::Tie
            }
        }
        Rule::R2 => Winner::from_ordering(na.mass.total_cmp(&nb.mass)),
        Rule::R3 => Winner::from_ordering(ez_rank(na).cmp(&ez_rank(nb))),
        Rule::R4a => Winner::from_ordering(stereogenic_rank(na).cmp(&stereogenic_rank(nb))),
        Rule::R4c => Winner::from_ordering(pseudo_rank(na).cmp(&pseudo_rank(nb))),
        Rule::R4b | Rule::R5 => Winner::Tie,
        Rule::R6 => {
            let promoted = |n: &CipNode| tree.rule6_ref.is_some() && n.real_atom() == tree.rule6_ref;
            Winner::from_ordering(promoted(na).cmp(&promoted(nb)))
        }
    }
}

fn ez_rank(node: &CipNode) -> u8 {
    match node.aux_ez {
        Some(AuxEz::SeqCis) => 2,
        Some(AuxEz::SeqTrans) => 1,
        None => 0,
    }
}

fn stereogenic_rank(node: &CipNode) -> u8 {
    match node.aux {
        Some(aux) if !aux.is_pseudo() => 2,
        Some(_) => 1,
        None => 0,
    }
}

fn pseudo_rank(node: &CipNode) -> u8 {
    match node.aux {
        Some(AuxChirality::PseudoR) => 2,
        Some(AuxChirality::PseudoS) => 1,
        _ => 0,
    }
}
