//! Auxiliary descriptors: stereo of the atoms and bonds inside a digraph, as
//! seen from the digraph's own root. Rules 3 to 5 compare these instead of
//! the molecule's global descriptors.

use petgraph::graph::NodeIndex;

use super::alkene::{chain_label, end_winner, Chain};
use super::digraph::{Digraph, NodeId, ROOT};
use super::engine::{run_rules, tetrahedral_descriptor, Env};
use super::error::CipError;
use super::label::{AuxChirality, AuxEz};

/// Assigns auxiliary descriptors below the root, deepest nodes first.
pub(crate) fn generate(tree: &mut Digraph, env: &Env) -> Result<(), CipError> {
    let subs = tree.node(ROOT).subs.clone();
    for sub in subs {
        visit(tree, env, sub)?;
    }
    Ok(())
}

fn visit(tree: &mut Digraph, env: &Env, id: NodeId) -> Result<(), CipError> {
    tree.ensure_expanded(env, id)?;
    if tree.node(id).is_leaf() {
        return Ok(());
    }
    for sub in tree.node(id).subs.clone() {
        visit(tree, env, sub)?;
    }
    if starts_chain(tree, id) {
        resolve_chain(tree, env, id)?;
    }
    let candidate = tree
        .node(id)
        .real_atom()
        .is_some_and(|atom| env.candidates.contains(&atom));
    if candidate && tree.node(id).aux.is_none() {
        tree.nodes[id].aux = center_aux(tree, env, id)?;
    }
    Ok(())
}

/// A node leaving on an alkene bond it was not itself reached by.
fn starts_chain(tree: &Digraph, id: NodeId) -> bool {
    let node = tree.node(id);
    node.next_sp2.is_some()
        && node
            .parent
            .map_or(true, |parent| tree.node(parent).next_sp2 != Some(id))
}

fn resolve_chain(tree: &mut Digraph, env: &Env, start: NodeId) -> Result<(), CipError> {
    let mut nodes = vec![start];
    let mut cur = start;
    while let Some(next) = tree.node(cur).next_sp2 {
        tree.ensure_expanded(env, next)?;
        nodes.push(next);
        cur = next;
    }
    let atoms: Vec<NodeIndex> = nodes
        .iter()
        .filter_map(|&n| tree.node(n).real_atom())
        .collect();
    if atoms.len() != nodes.len() {
        return Ok(());
    }
    let chain = Chain { atoms };
    let (first, last) = chain.ends();
    if first == last {
        return Ok(());
    }
    if chain.is_planar() {
        let mid = chain.double_bonds() / 2;
        let central = env.topology.neighbor(chain.atoms[mid], chain.atoms[mid + 1]);
        if central.is_some_and(|n| env.perception.in_small_ring(n.bond)) {
            return Ok(());
        }
    }

    let end = cur;
    let (inner_start, inner_end) = chain.inner();
    let mut from_start = tree.reroot(env, start)?;
    let Some((ref_start, rule_start)) = end_winner(&mut from_start, env, inner_start, false)?
    else {
        return Ok(());
    };
    let mut from_end = tree.reroot(env, end)?;
    let Some((ref_end, rule_end)) = end_winner(&mut from_end, env, inner_end, false)? else {
        return Ok(());
    };
    let rule = rule_start.max(rule_end);
    let Some(label) = chain_label(env, &chain, [ref_start, ref_end], rule) else {
        return Ok(());
    };

    if chain.is_planar() {
        let ez = AuxEz::from_label(label);
        tree.nodes[start].aux_ez = ez;
        tree.nodes[end].aux_ez = ez;
    } else {
        let mid = nodes[chain.double_bonds() / 2];
        tree.nodes[mid].aux = AuxChirality::from_label(label);
    }
    Ok(())
}

/// Chirality of the center at `id`, ranked from its own point of view with
/// the way back to the root as one of its ligands.
fn center_aux(
    tree: &mut Digraph,
    env: &Env,
    id: NodeId,
) -> Result<Option<AuxChirality>, CipError> {
    let Some(atom) = tree.node(id).real_atom() else {
        return Ok(None);
    };
    if env.topology.hydrogen_count(atom) > 1 {
        return Ok(None);
    }
    let mut local = tree.reroot(env, id)?;
    let Some(rule) = run_rules(&mut local, env, false, |t| t.is_fully_ranked(ROOT))? else {
        return Ok(None);
    };
    Ok(tetrahedral_descriptor(&local, env, atom, rule)
        .and_then(|descriptor| AuxChirality::from_label(descriptor.label)))
}
