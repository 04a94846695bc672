use std::collections::{HashSet, VecDeque};

use petgraph::graph::EdgeIndex;

use crate::mol::Mol;

/// Size of the smallest ring containing `bond`, if it is no larger than
/// `max_size`.
///
/// Runs a breadth-first search from one endpoint to the other with the bond
/// itself removed; the ring size is the path length plus one.
pub fn smallest_ring_through_bond<A, B>(
    mol: &Mol<A, B>,
    bond: EdgeIndex,
    max_size: usize,
) -> Option<usize> {
    let (a, b) = mol.bond_endpoints(bond)?;
    let n = mol.atom_count();
    let mut dist = vec![u32::MAX; n];
    dist[a.index()] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(a);
    while let Some(cur) = queue.pop_front() {
        let d = dist[cur.index()];
        if d as usize + 1 >= max_size {
            continue;
        }
        for edge in mol.bonds_of(cur) {
            if edge == bond {
                continue;
            }
            let Some((x, y)) = mol.bond_endpoints(edge) else {
                continue;
            };
            let nb = if x == cur { y } else { x };
            if dist[nb.index()] != u32::MAX {
                continue;
            }
            dist[nb.index()] = d + 1;
            if nb == b {
                return Some(d as usize + 2);
            }
            queue.push_back(nb);
        }
    }
    None
}

/// Bonds that lie in at least one ring with fewer than `limit` members.
pub fn small_ring_bonds<A, B>(mol: &Mol<A, B>, limit: usize) -> HashSet<EdgeIndex> {
    if limit < 4 {
        return HashSet::new();
    }
    mol.bonds()
        .filter(|&e| smallest_ring_through_bond(mol, e, limit - 1).is_some())
        .collect()
}
