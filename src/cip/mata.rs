//! Rules 4b and 5: comparing whole ligands by the sequence of auxiliary
//! descriptors met while walking them in priority order.
//!
//! Rule 4b pairs every descriptor with a reference descriptor taken from the
//! highest-ranked stereogenic unit and prefers the ligand whose sequence of
//! like/unlike marks shows "like" first. Rule 5 does the same against a
//! fixed reference of R, so R (and M) precede S (and P).

use std::collections::VecDeque;

use super::digraph::{Digraph, NodeId, SortMode, ROOT};
use super::engine::Env;
use super::error::CipError;
use super::label::{AuxChirality, Rule};
use super::rules::Winner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Mark {
    Like,
    Unlike,
}

#[derive(Debug, Clone)]
struct Entry {
    sphere: usize,
    /// Priorities along the way down from the ligand.
    path: Vec<usize>,
    aux: AuxChirality,
}

impl Entry {
    fn same_position(&self, other: &Entry) -> bool {
        self.sphere == other.sphere && self.path == other.path
    }
}

/// Compares sibling ligands `a` and `b` under Rule 4b or Rule 5.
pub(crate) fn compare(
    tree: &mut Digraph,
    env: &Env,
    rule: Rule,
    a: NodeId,
    b: NodeId,
) -> Result<Winner, CipError> {
    let ea = entries(tree, env, rule, a)?;
    let eb = entries(tree, env, rule, b)?;
    if rule == Rule::R4b {
        let sa = best_like_sequence(&ea);
        let sb = best_like_sequence(&eb);
        return Ok(Winner::from_ordering(sb.cmp(&sa)));
    }

    let sa = marks(&ea, |aux| aux.is_r_like());
    let sb = marks(&eb, |aux| aux.is_r_like());
    let winner = Winner::from_ordering(only_marks(&sb).cmp(&only_marks(&sa)));
    if !winner.is_tie() && tree.node(a).parent == Some(ROOT) {
        let first_difference = sa.iter().zip(&sb).find(|(x, y)| x.0 != y.0);
        if let Some((x, y)) = first_difference {
            if x.1 && y.1 {
                tree.rule5_pseudo_exempt = true;
            }
        }
    }
    Ok(winner)
}

/// Descriptors below `ligand` in breadth-first priority order.
fn entries(
    tree: &mut Digraph,
    env: &Env,
    rule: Rule,
    ligand: NodeId,
) -> Result<Vec<Entry>, CipError> {
    let through = if rule == Rule::R4b {
        Rule::R4a
    } else {
        Rule::R4c
    };
    let mut out = Vec::new();
    let mut queue = VecDeque::from([(ligand, Vec::new())]);
    while let Some((id, path)) = queue.pop_front() {
        let node = tree.node(id);
        if node.duplicate || node.is_phantom() {
            continue;
        }
        if let Some(aux) = node.aux {
            out.push(Entry {
                sphere: node.sphere,
                path: path.clone(),
                aux,
            });
        }
        if node.terminal {
            continue;
        }
        tree.sort_node(env, id, through, SortMode::Full)?;
        let node = tree.node(id);
        for (&sub, &priority) in node.subs.iter().zip(&node.priorities) {
            let mut sub_path = path.clone();
            sub_path.push(priority);
            queue.push_back((sub, sub_path));
        }
    }
    out.sort_by(|x, y| (x.sphere, &x.path).cmp(&(y.sphere, &y.path)));
    Ok(out)
}

/// Like/unlike marks against a reference, paired with whether the entry is
/// pseudoasymmetric. Entries at the same position are tied branches; their
/// marks are ordered like-first.
fn marks(entries: &[Entry], like: impl Fn(AuxChirality) -> bool) -> Vec<(Mark, bool)> {
    let mut out = Vec::with_capacity(entries.len());
    let mut start = 0;
    while start < entries.len() {
        let end = entries[start..]
            .iter()
            .position(|e| !e.same_position(&entries[start]))
            .map_or(entries.len(), |len| start + len);
        let mut group: Vec<(Mark, bool)> = entries[start..end]
            .iter()
            .map(|e| {
                let mark = if like(e.aux) { Mark::Like } else { Mark::Unlike };
                (mark, e.aux.is_pseudo())
            })
            .collect();
        group.sort();
        out.extend(group);
        start = end;
    }
    out
}

fn only_marks(marks: &[(Mark, bool)]) -> Vec<Mark> {
    marks.iter().map(|&(mark, _)| mark).collect()
}

/// The most "like" sequence over every admissible reference. References are
/// the highest-ranked chiral descriptors, or pseudoasymmetric ones when no
/// chiral descriptor exists.
fn best_like_sequence(entries: &[Entry]) -> Vec<Mark> {
    let chiral: Vec<&Entry> = entries.iter().filter(|e| !e.aux.is_pseudo()).collect();
    let pool: Vec<&Entry> = if chiral.is_empty() {
        entries.iter().collect()
    } else {
        chiral
    };
    let Some(first) = pool.first() else {
        return Vec::new();
    };
    pool.iter()
        .filter(|e| e.same_position(first))
        .map(|reference| {
            let r_like = reference.aux.is_r_like();
            only_marks(&marks(entries, |aux| aux.is_r_like() == r_like))
        })
        .min()
        .unwrap_or_default()
}
