//! Ranking substituents within the digraph.
//!
//! Sorting is incremental: a node remembers the last rule it was ranked
//! under, and asking for a later rule first ranks it under every earlier
//! active rule. A node stamped `(rule, mode)` is fully ranked under every
//! rule before `rule`.

use super::digraph::{Digraph, NodeId, SortMode};
use super::engine::Env;
use super::error::CipError;
use super::label::Rule;
use super::mata;
use super::rules::{self, Outcome, Winner};

impl Digraph {
    /// Ranks the substituents of `id` under `rule` and all active rules
    /// before it.
    pub(crate) fn sort_node(
        &mut self,
        env: &Env,
        id: NodeId,
        rule: Rule,
        mode: SortMode,
    ) -> Result<(), CipError> {
        if self.is_sorted(id, rule, mode) {
            return Ok(());
        }
        self.ensure_expanded(env, id)?;
        for &earlier in env.rules.iter().take_while(|&&r| r < rule) {
            if self.is_sorted(id, earlier, SortMode::Full) {
                continue;
            }
            self.sort_once(env, id, earlier, SortMode::Full)?;
            self.nodes[id].sorted = Some((earlier, SortMode::Full));
        }
        self.sort_once(env, id, rule, mode)?;
        self.nodes[id].sorted = Some((rule, mode));
        Ok(())
    }

    fn is_sorted(&self, id: NodeId, rule: Rule, mode: SortMode) -> bool {
        self.nodes[id].sorted.is_some_and(|done| done >= (rule, mode))
    }

    /// Ranks every expanded node under `rule` at its own level, deepest
    /// first, without exploring ties.
    pub(crate) fn presort(&mut self, env: &Env, rule: Rule) -> Result<(), CipError> {
        for id in (0..self.nodes.len()).rev() {
            let node = &self.nodes[id];
            if node.expanded && node.subs.len() > 1 {
                self.sort_node(env, id, rule, SortMode::IgnoreTies)?;
            }
        }
        Ok(())
    }

    /// One pass of pairwise comparisons. Earlier priorities are final; only
    /// pairs tied so far are compared under `rule`.
    fn sort_once(
        &mut self,
        env: &Env,
        id: NodeId,
        rule: Rule,
        mode: SortMode,
    ) -> Result<(), CipError> {
        let subs = self.nodes[id].subs.clone();
        let n = subs.len();
        if n < 2 {
            return Ok(());
        }
        let previous = self.nodes[id].priorities.clone();
        let mut losses = vec![0usize; n];
        for i in 0..n {
            for j in i + 1..n {
                let winner = if previous[i] != previous[j] {
                    if previous[i] < previous[j] {
                        Winner::A
                    } else {
                        Winner::B
                    }
                } else {
                    self.compare_ligands(env, rule, mode, subs[i], subs[j])?
                };
                match winner {
                    Winner::A => losses[j] += 1,
                    Winner::B => losses[i] += 1,
                    Winner::Tie => {}
                }
            }
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by_key(|&k| losses[k]);
        let mut priorities: Vec<usize> = order.iter().map(|&k| losses[k]).collect();
        let reordered = order.iter().map(|&k| subs[k]).collect();
        let mut distinct = priorities.clone();
        distinct.dedup();

        let node = &mut self.nodes[id];
        node.subs = reordered;
        node.n_priorities = distinct.len();
        std::mem::swap(&mut node.priorities, &mut priorities);
        Ok(())
    }

    /// Compares two sibling substituents under a single rule.
    pub(crate) fn compare_ligands(
        &mut self,
        env: &Env,
        rule: Rule,
        mode: SortMode,
        a: NodeId,
        b: NodeId,
    ) -> Result<Winner, CipError> {
        if rule.ignores_ties() {
            return mata::compare(self, env, rule, a, b);
        }
        let winner = rules::compare(self, rule, a, b);
        if !winner.is_tie() || mode == SortMode::IgnoreTies {
            return Ok(winner);
        }
        let sphere = self.nodes[a].sphere;
        Ok(self.break_tie(env, rule, a, b, sphere)?.winner)
    }

    /// Explores the branches below two nodes that `rule` ties on, sphere by
    /// sphere, and reports the first sphere where they differ.
    fn break_tie(
        &mut self,
        env: &Env,
        rule: Rule,
        a: NodeId,
        b: NodeId,
        sphere: usize,
    ) -> Result<Outcome, CipError> {
        if rule <= Rule::R1b {
            let (na, nb) = (&self.nodes[a], &self.nodes[b]);
            match (na.duplicate, nb.duplicate) {
                (true, false) => return Ok(Outcome::at(Winner::B, sphere + 1)),
                (false, true) => return Ok(Outcome::at(Winner::A, sphere + 1)),
                (true, true) if na.atom == nb.atom && na.root_distance == nb.root_distance => {
                    return Ok(Outcome::tie());
                }
                _ => {}
            }
        }
        self.ensure_expanded(env, a)?;
        self.ensure_expanded(env, b)?;
        match (self.nodes[a].is_leaf(), self.nodes[b].is_leaf()) {
            (true, true) => return Ok(Outcome::tie()),
            (true, false) => return Ok(Outcome::at(Winner::B, sphere + 1)),
            (false, true) => return Ok(Outcome::at(Winner::A, sphere + 1)),
            (false, false) => {}
        }

        self.sort_node(env, a, rule, SortMode::Full)?;
        self.sort_node(env, b, rule, SortMode::Full)?;
        let subs_a = self.nodes[a].subs.clone();
        let subs_b = self.nodes[b].subs.clone();
        let width = subs_a.len().max(subs_b.len());

        for slot in 0..width {
            let winner = self.compare_slot(rule, subs_a.get(slot), subs_b.get(slot));
            if !winner.is_tie() {
                return Ok(Outcome::at(winner, sphere + 1));
            }
        }

        let mut best = Outcome::tie();
        for (&x, &y) in subs_a.iter().zip(&subs_b) {
            let outcome = self.break_tie(env, rule, x, y, sphere + 1)?;
            if outcome.sphere < best.sphere {
                best = outcome;
            }
        }
        Ok(best)
    }

    /// A missing slot behaves like a phantom.
    fn compare_slot(&self, rule: Rule, a: Option<&NodeId>, b: Option<&NodeId>) -> Winner {
        let real = |id: Option<&NodeId>| id.copied().filter(|&n| !self.nodes[n].is_phantom());
        match (real(a), real(b)) {
            (None, None) => Winner::Tie,
            (None, Some(_)) => Winner::B,
            (Some(_), None) => Winner::A,
            (Some(x), Some(y)) => rules::compare(self, rule, x, y),
        }
    }
}
