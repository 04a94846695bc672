use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// A ligand position around a stereocenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AtomId {
    Node(NodeIndex),
    /// The k-th suppressed hydrogen of an atom.
    VirtualH(NodeIndex, u8),
    /// The lone pair of a trigonal-pyramidal center (N, P, S, ...).
    LonePair(NodeIndex),
}

impl AtomId {
    pub fn node(self) -> Option<NodeIndex> {
        match self {
            AtomId::Node(idx) => Some(idx),
            _ => None,
        }
    }
}

/// Looking from `above[0]` toward `center`, `above[1..4]` run counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TetrahedralStereo {
    pub center: NodeIndex,
    pub above: [AtomId; 4],
}

/// `refs[0]` hangs off `bond.0`, `refs[1]` off `bond.1`, and the two are cis.
///
/// For a cumulene `bond` holds the two terminal sp² atoms of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EZStereo {
    pub bond: (NodeIndex, NodeIndex),
    pub refs: [AtomId; 2],
}

impl EZStereo {
    /// Builds the annotation with `ref_a` cis to `ref_b`, normalizing the
    /// endpoint order.
    pub fn new(a: NodeIndex, b: NodeIndex, ref_a: AtomId, ref_b: AtomId) -> Self {
        if a.index() <= b.index() {
            Self {
                bond: (a, b),
                refs: [ref_a, ref_b],
            }
        } else {
            Self {
                bond: (b, a),
                refs: [ref_b, ref_a],
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Torsion {
    Positive,
    Negative,
}

impl Torsion {
    pub fn flipped(self) -> Self {
        match self {
            Torsion::Positive => Torsion::Negative,
            Torsion::Negative => Torsion::Positive,
        }
    }
}

/// Handedness of a stereogenic axis (allene, odd cumulene, hindered biaryl).
///
/// `torsion` is the sign of the dihedral `refs[0]`–`axis.0`–`axis.1`–`refs[1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxialStereo {
    pub axis: (NodeIndex, NodeIndex),
    pub refs: [AtomId; 2],
    pub torsion: Torsion,
}

impl AxialStereo {
    pub fn new(a: NodeIndex, b: NodeIndex, ref_a: AtomId, ref_b: AtomId, torsion: Torsion) -> Self {
        let (axis, refs) = if a.index() <= b.index() {
            ((a, b), [ref_a, ref_b])
        } else {
            ((b, a), [ref_b, ref_a])
        };
        Self {
            axis,
            refs,
            torsion,
        }
    }
}

pub struct Mol<A, B> {
    graph: UnGraph<A, B>,
    tetrahedral_stereo: Vec<TetrahedralStereo>,
    ez_stereo: Vec<EZStereo>,
    axial_stereo: Vec<AxialStereo>,
}

fn ordered(a: NodeIndex, b: NodeIndex) -> (NodeIndex, NodeIndex) {
    if a.index() < b.index() {
        (a, b)
    } else {
        (b, a)
    }
}

impl<A, B> Mol<A, B> {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            tetrahedral_stereo: Vec::new(),
            ez_stereo: Vec::new(),
            axial_stereo: Vec::new(),
        }
    }

    pub fn graph(&self) -> &UnGraph<A, B> {
        &self.graph
    }

    pub fn atom(&self, idx: NodeIndex) -> &A {
        &self.graph[idx]
    }

    pub fn atom_mut(&mut self, idx: NodeIndex) -> &mut A {
        &mut self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &B {
        &self.graph[idx]
    }

    pub fn bond_mut(&mut self, idx: EdgeIndex) -> &mut B {
        &mut self.graph[idx]
    }

    pub fn add_atom(&mut self, atom: A) -> NodeIndex {
        self.graph.add_node(atom)
    }

    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: B) -> EdgeIndex {
        self.graph.add_edge(a, b, bond)
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    pub fn bonds_of(&self, idx: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges(idx).map(|e| e.id())
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn bond_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    pub fn tetrahedral_stereo(&self) -> &[TetrahedralStereo] {
        &self.tetrahedral_stereo
    }

    pub fn tetrahedral_stereo_for(&self, center: NodeIndex) -> Option<&TetrahedralStereo> {
        self.tetrahedral_stereo.iter().find(|s| s.center == center)
    }

    pub fn add_tetrahedral_stereo(&mut self, stereo: TetrahedralStereo) {
        self.remove_tetrahedral_stereo(stereo.center);
        self.tetrahedral_stereo.push(stereo);
    }

    pub fn remove_tetrahedral_stereo(&mut self, center: NodeIndex) {
        self.tetrahedral_stereo.retain(|s| s.center != center);
    }

    pub fn ez_stereo(&self) -> &[EZStereo] {
        &self.ez_stereo
    }

    pub fn ez_stereo_for(&self, a: NodeIndex, b: NodeIndex) -> Option<&EZStereo> {
        let key = ordered(a, b);
        self.ez_stereo.iter().find(|s| s.bond == key)
    }

    pub fn add_ez_stereo(&mut self, stereo: EZStereo) {
        self.remove_ez_stereo(stereo.bond.0, stereo.bond.1);
        self.ez_stereo.push(stereo);
    }

    pub fn remove_ez_stereo(&mut self, a: NodeIndex, b: NodeIndex) {
        let key = ordered(a, b);
        self.ez_stereo.retain(|s| s.bond != key);
    }

    pub fn axial_stereo(&self) -> &[AxialStereo] {
        &self.axial_stereo
    }

    pub fn axial_stereo_for(&self, a: NodeIndex, b: NodeIndex) -> Option<&AxialStereo> {
        let key = ordered(a, b);
        self.axial_stereo.iter().find(|s| s.axis == key)
    }

    pub fn add_axial_stereo(&mut self, stereo: AxialStereo) {
        let key = stereo.axis;
        self.axial_stereo.retain(|s| s.axis != key);
        self.axial_stereo.push(stereo);
    }
}

impl<A: Clone, B: Clone> Clone for Mol<A, B> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            tetrahedral_stereo: self.tetrahedral_stereo.clone(),
            ez_stereo: self.ez_stereo.clone(),
            axial_stereo: self.axial_stereo.clone(),
        }
    }
}

impl<A, B> Default for Mol<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: std::fmt::Debug, B: std::fmt::Debug> std::fmt::Debug for Mol<A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mol")
            .field("atom_count", &self.atom_count())
            .field("bond_count", &self.bond_count())
            .field("tetrahedral_stereo", &self.tetrahedral_stereo)
            .field("ez_stereo", &self.ez_stereo)
            .field("axial_stereo", &self.axial_stereo)
            .finish()
    }
}

/// `true` when `to` is an even permutation of `from`.
///
/// Callers must make sure both slices hold the same elements.
pub(crate) fn permutation_parity<T: Eq>(from: &[T], to: &[T]) -> bool {
    let n = from.len();
    if n != to.len() {
        return true;
    }
    let perm: Vec<usize> = from
        .iter()
        .map(|f| to.iter().position(|t| t == f).unwrap_or(0))
        .collect();
    let mut visited = vec![false; n];
    let mut swaps = 0usize;
    for i in 0..n {
        if visited[i] {
            continue;
        }
        let mut cycle_len = 0;
        let mut j = i;
        while !visited[j] {
            visited[j] = true;
            j = perm[j];
            cycle_len += 1;
        }
        swaps += cycle_len - 1;
    }
    swaps % 2 == 0
}
