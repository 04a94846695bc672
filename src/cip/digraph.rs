//! Hierarchical digraph: the tree of paths radiating from a stereocenter.
//!
//! Every simple path from the root becomes a branch. A ring closure ends its
//! path in a duplicate of the atom it returns to, and each extra bond of a
//! multiple bond adds a duplicate on both ends. Nodes live in an arena and
//! are expanded lazily, so branches that never need comparing are never
//! built.

use std::cmp::Ordering;
use std::collections::HashMap;

use petgraph::graph::NodeIndex;
use tracing::debug;

use super::engine::Env;
use super::error::CipError;
use super::label::{AuxChirality, AuxEz, Rule};
use super::mass::rule2_mass;
use crate::mol::AtomId;

pub(crate) type NodeId = usize;

/// The root always sits at the front of the arena.
pub(crate) const ROOT: NodeId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum SortMode {
    /// Same-rule comparisons only, no exploration past a tie.
    IgnoreTies,
    Full,
}

#[derive(Debug, Clone)]
pub(crate) struct CipNode {
    /// `None` marks a phantom filler (missing ligand or lone pair).
    pub atom: Option<AtomId>,
    pub duplicate: bool,
    /// Atomic number, averaged over Kekulé partners for some duplicates.
    pub element: f64,
    pub mass: f64,
    pub sphere: usize,
    /// Rule 1b distance: for ring-closure duplicates the sphere of the atom
    /// they duplicate, for multiple-bond duplicates the sphere of the atom
    /// they hang from.
    pub root_distance: usize,
    pub parent: Option<NodeId>,
    /// Kept in priority order once sorted.
    pub subs: Vec<NodeId>,
    /// Number of siblings ranked above each substituent; ties share a value.
    pub priorities: Vec<usize>,
    pub n_priorities: usize,
    pub sorted: Option<(Rule, SortMode)>,
    pub terminal: bool,
    pub expanded: bool,
    pub aux: Option<AuxChirality>,
    pub aux_ez: Option<AuxEz>,
    /// Next atom along an alkene or cumulene leaving this node.
    pub next_sp2: Option<NodeId>,
    path: HashMap<NodeIndex, usize>,
}

impl CipNode {
    fn blank(atom: Option<AtomId>, sphere: usize, parent: Option<NodeId>) -> Self {
        Self {
            atom,
            duplicate: false,
            element: 0.0,
            mass: 0.0,
            sphere,
            root_distance: 0,
            parent,
            subs: Vec::new(),
            priorities: Vec::new(),
            n_priorities: 0,
            sorted: None,
            terminal: true,
            expanded: true,
            aux: None,
            aux_ez: None,
            next_sp2: None,
            path: HashMap::new(),
        }
    }

    pub(crate) fn phantom(sphere: usize, parent: Option<NodeId>) -> Self {
        Self::blank(None, sphere, parent)
    }

    fn real(
        env: &Env,
        atom: NodeIndex,
        sphere: usize,
        parent: Option<NodeId>,
        path: HashMap<NodeIndex, usize>,
    ) -> Self {
        let topo = env.topology;
        let facts = topo.facts(atom);
        let terminal = parent.is_some()
            && topo.ligand_count(atom) <= 1
            && topo
                .neighbors(atom)
                .iter()
                .all(|n| topo.duplicates_for(atom, n.atom, n.order) == 0);
        Self {
            element: facts.atomic_num as f64,
            mass: rule2_mass(facts.atomic_num, facts.isotope, false),
            terminal,
            expanded: terminal,
            path,
            ..Self::blank(Some(AtomId::Node(atom)), sphere, parent)
        }
    }

    fn implicit_hydrogen(id: AtomId, sphere: usize, parent: NodeId) -> Self {
        Self {
            element: 1.0,
            mass: rule2_mass(1, 0, false),
            ..Self::blank(Some(id), sphere, Some(parent))
        }
    }

    fn duplicate(
        env: &Env,
        of: NodeIndex,
        element: f64,
        root_distance: usize,
        sphere: usize,
        parent: NodeId,
    ) -> Self {
        Self {
            duplicate: true,
            element,
            mass: rule2_mass(env.topology.atomic_num(of), 0, true),
            root_distance,
            ..Self::blank(Some(AtomId::Node(of)), sphere, Some(parent))
        }
    }

    pub fn is_phantom(&self) -> bool {
        self.atom.is_none()
    }

    /// Nothing hangs below a leaf but phantoms.
    pub fn is_leaf(&self) -> bool {
        self.terminal || self.duplicate || self.atom.is_none()
    }

    /// The molecule atom behind a non-duplicate node.
    pub fn real_atom(&self) -> Option<NodeIndex> {
        if self.duplicate {
            return None;
        }
        self.atom.and_then(AtomId::node)
    }

    /// Copy for a new arena: same chemistry and auxiliary stereo, fresh
    /// links and rankings.
    fn relinked(&self, parent: Option<NodeId>, sphere: usize) -> Self {
        Self {
            sphere,
            parent,
            subs: Vec::new(),
            priorities: Vec::new(),
            n_priorities: 0,
            sorted: None,
            next_sp2: None,
            ..self.clone()
        }
    }
}

/// Initial ordering of freshly created substituents, by the constitutional
/// rules alone.
fn shallow_order(a: &CipNode, b: &CipNode) -> Ordering {
    b.element
        .total_cmp(&a.element)
        .then_with(|| match (a.duplicate, b.duplicate) {
            (true, true) => a.root_distance.cmp(&b.root_distance),
            _ => Ordering::Equal,
        })
        .then_with(|| b.mass.total_cmp(&a.mass))
}

#[derive(Debug, Clone)]
pub(crate) struct Digraph {
    pub nodes: Vec<CipNode>,
    pub root_atom: NodeIndex,
    /// Ring closures that lead back to the root atom.
    pub root_duplicates: usize,
    /// Atom promoted by the Rule 6 resolver.
    pub rule6_ref: Option<NodeIndex>,
    /// Set when a Rule 5 decision rested only on pseudoasymmetric
    /// descriptors, which makes the result a true chirality.
    pub rule5_pseudo_exempt: bool,
}

impl Digraph {
    /// Builds the first sphere of the digraph rooted at `atom`.
    ///
    /// Returns `None` when the atom cannot be a stereocenter: two or more
    /// unlabelled hydrogens, or more ligands than a tetrahedron holds.
    pub fn for_root(env: &Env, atom: NodeIndex) -> Result<Option<Self>, CipError> {
        if !env.topology.contains(atom) {
            return Err(CipError::UnknownAtom(atom.index()));
        }
        if env.topology.hydrogen_count(atom) > 1 {
            return Ok(None);
        }
        let mut tree = Digraph {
            nodes: vec![CipNode::real(env, atom, 0, None, HashMap::new())],
            root_atom: atom,
            root_duplicates: 0,
            rule6_ref: None,
            rule5_pseudo_exempt: false,
        };
        tree.ensure_expanded(env, ROOT)?;
        if tree.nodes[ROOT].terminal {
            return Ok(None);
        }
        Ok(Some(tree))
    }

    pub fn node(&self, id: NodeId) -> &CipNode {
        &self.nodes[id]
    }

    pub fn sub(&self, id: NodeId, slot: usize) -> Option<NodeId> {
        self.nodes[id].subs.get(slot).copied()
    }

    pub fn is_fully_ranked(&self, id: NodeId) -> bool {
        let node = &self.nodes[id];
        !node.subs.is_empty() && node.n_priorities == node.subs.len()
    }

    /// Priority of a substituent of `parent`, if it is one.
    pub fn priority_of(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        let node = &self.nodes[parent];
        node.subs
            .iter()
            .position(|&s| s == child)
            .map(|i| node.priorities[i])
    }

    pub fn has_stereo(&self) -> bool {
        self.nodes.iter().any(|n| n.aux.is_some())
    }

    pub fn clear_auxiliary(&mut self) {
        for node in &mut self.nodes {
            node.aux = None;
            node.aux_ez = None;
        }
    }

    /// Forgets every ranking so the rules can be rerun from scratch.
    pub fn reset_rankings(&mut self) {
        for node in &mut self.nodes {
            node.priorities = vec![0; node.subs.len()];
            node.n_priorities = usize::from(!node.subs.is_empty());
            node.sorted = None;
        }
    }

    /// Creates the substituents of `id` if that has not happened yet.
    pub fn ensure_expanded(&mut self, env: &Env, id: NodeId) -> Result<(), CipError> {
        if self.nodes[id].expanded {
            return Ok(());
        }
        self.nodes[id].expanded = true;
        let Some(atom) = self.nodes[id].real_atom() else {
            return Ok(());
        };
        let topo = env.topology;
        let sphere = self.nodes[id].sphere;
        let parent_atom = self.nodes[id]
            .parent
            .and_then(|p| self.nodes[p].atom)
            .and_then(AtomId::node);
        let mut path = std::mem::take(&mut self.nodes[id].path);
        path.insert(atom, sphere);

        // (node, continues an alkene from this atom)
        let mut fresh: Vec<(CipNode, bool)> = Vec::new();
        for nb in topo.neighbors(atom) {
            let extra = topo.duplicates_for(atom, nb.atom, nb.order);
            let dup_element = self.duplicate_element(env, atom, nb.atom);
            if Some(nb.atom) != parent_atom {
                if let Some(&first) = path.get(&nb.atom) {
                    if first == 0 {
                        self.root_duplicates += 1;
                    }
                    let element = topo.atomic_num(nb.atom) as f64;
                    fresh.push((
                        CipNode::duplicate(env, nb.atom, element, first, sphere + 1, id),
                        false,
                    ));
                } else {
                    let alkene = topo.is_alkene_bond(atom, nb.atom, nb.order);
                    fresh.push((
                        CipNode::real(env, nb.atom, sphere + 1, Some(id), path.clone()),
                        alkene,
                    ));
                }
            }
            for _ in 0..extra {
                fresh.push((
                    CipNode::duplicate(env, nb.atom, dup_element, sphere, sphere + 1, id),
                    false,
                ));
            }
        }
        for k in 0..topo.facts(atom).implicit_h {
            let h = CipNode::implicit_hydrogen(AtomId::VirtualH(atom, k), sphere + 1, id);
            fresh.push((h, false));
        }

        let capacity = if id == ROOT { 4 } else { 3 };
        if fresh.len() > capacity {
            debug!(
                target: "cipcrab::cip",
                atom = atom.index(),
                ligands = fresh.len(),
                "too many ligands for a stereocenter; treating atom as terminal"
            );
            self.nodes[id].terminal = true;
            return Ok(());
        }
        if id == ROOT {
            while fresh.len() < capacity {
                fresh.push((CipNode::phantom(sphere + 1, Some(id)), false));
            }
        }
        if self.nodes.len() + fresh.len() > env.config.max_digraph_nodes {
            return Err(CipError::DigraphTooLarge {
                atom: self.root_atom.index(),
                limit: env.config.max_digraph_nodes,
            });
        }

        fresh.sort_by(|(a, _), (b, _)| shallow_order(a, b));
        let mut subs = Vec::with_capacity(fresh.len());
        for (node, alkene) in fresh {
            let child = self.nodes.len();
            self.nodes.push(node);
            if alkene {
                self.nodes[id].next_sp2 = Some(child);
            }
            subs.push(child);
        }
        self.set_subs(id, subs);
        Ok(())
    }

    /// Element number for a multiple-bond duplicate hanging from `attached`.
    ///
    /// When the double bond could sit on either side of a Kekulé-ambiguous
    /// atom the duplicate takes the mean element of those candidate partners.
    fn duplicate_element(&self, env: &Env, attached: NodeIndex, duplicated: NodeIndex) -> f64 {
        let topo = env.topology;
        let perception = env.perception;
        if perception.is_kekule_ambiguous(attached) && perception.is_kekule_ambiguous(duplicated) {
            let partners: Vec<f64> = topo
                .neighbors(attached)
                .iter()
                .filter(|n| env.perception.is_kekule_ambiguous(n.atom))
                .map(|n| topo.atomic_num(n.atom) as f64)
                .collect();
            if !partners.is_empty() {
                return partners.iter().sum::<f64>() / partners.len() as f64;
            }
        }
        topo.atomic_num(duplicated) as f64
    }

    fn set_subs(&mut self, id: NodeId, mut subs: Vec<NodeId>) {
        subs.sort_by(|&a, &b| shallow_order(&self.nodes[a], &self.nodes[b]));
        let node = &mut self.nodes[id];
        node.priorities = vec![0; subs.len()];
        node.n_priorities = usize::from(!subs.is_empty());
        node.subs = subs;
    }

    /// A fresh tree rooted at `at`, with the route back to the old root
    /// turned into an ordinary substituent. Root distances and auxiliary
    /// descriptors are carried over; spheres and rankings are recomputed.
    pub fn reroot(&mut self, env: &Env, at: NodeId) -> Result<Digraph, CipError> {
        self.ensure_expanded(env, at)?;
        let src: &Digraph = self;
        let root_atom = src.nodes[at].real_atom().unwrap_or(src.root_atom);
        let mut out = Digraph {
            nodes: Vec::with_capacity(src.nodes.len()),
            root_atom,
            root_duplicates: 0,
            rule6_ref: src.rule6_ref,
            rule5_pseudo_exempt: false,
        };
        let mut root = src.nodes[at].relinked(None, 0);
        root.terminal = false;
        out.nodes.push(root);

        let mut subs: Vec<NodeId> = src.nodes[at]
            .subs
            .iter()
            .map(|&s| out.copy_branch(src, s, ROOT, 1))
            .collect();
        if let Some(parent) = src.nodes[at].parent {
            subs.push(out.copy_return(src, at, parent, ROOT, 1));
        }
        while subs.len() < 4 {
            let phantom = out.nodes.len();
            out.nodes.push(CipNode::phantom(1, Some(ROOT)));
            subs.push(phantom);
        }
        out.set_subs(ROOT, subs);
        out.root_duplicates = out
            .nodes
            .iter()
            .filter(|n| n.duplicate && n.atom == Some(AtomId::Node(root_atom)))
            .count();
        Ok(out)
    }

    fn copy_branch(&mut self, src: &Digraph, id: NodeId, parent: NodeId, sphere: usize) -> NodeId {
        let new_id = self.nodes.len();
        let mut copy = src.nodes[id].relinked(Some(parent), sphere);
        if !copy.expanded {
            copy.path = self.ancestry(parent);
        }
        self.nodes.push(copy);
        let subs: Vec<NodeId> = src.nodes[id]
            .subs
            .iter()
            .map(|&s| self.copy_branch(src, s, new_id, sphere + 1))
            .collect();
        self.set_subs(new_id, subs);
        new_id
    }

    /// Atoms on the path from the root down to `id`, with their spheres.
    fn ancestry(&self, id: NodeId) -> HashMap<NodeIndex, usize> {
        let mut path = HashMap::new();
        let mut cur = Some(id);
        while let Some(n) = cur {
            let node = &self.nodes[n];
            if let Some(atom) = node.real_atom() {
                path.insert(atom, node.sphere);
            }
            cur = node.parent;
        }
        path
    }

    /// Copies `node` as seen from its former child `from`.
    fn copy_return(
        &mut self,
        src: &Digraph,
        from: NodeId,
        node: NodeId,
        parent: NodeId,
        sphere: usize,
    ) -> NodeId {
        let new_id = self.nodes.len();
        let mut copy = src.nodes[node].relinked(Some(parent), sphere);
        copy.terminal = false;
        copy.expanded = true;
        self.nodes.push(copy);
        let mut subs: Vec<NodeId> = src.nodes[node]
            .subs
            .iter()
            .filter(|&&s| s != from)
            .map(|&s| self.copy_branch(src, s, new_id, sphere + 1))
            .collect();
        if let Some(up) = src.nodes[node].parent {
            subs.push(self.copy_return(src, node, up, new_id, sphere + 1));
        }
        self.set_subs(new_id, subs);
        new_id
    }
}
