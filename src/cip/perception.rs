use std::collections::HashSet;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::bond::BondOrder;
use crate::element::has_lone_pair_stereo;
use crate::mol::Mol;
use crate::rings::small_ring_bonds;
use crate::traits::{HasAromaticity, HasAtomicNum, HasBondOrder, HasHydrogenCount};

/// Double bonds in rings smaller than this never receive E/Z.
pub const SMALL_RING_LIMIT: usize = 8;

/// Everything the CIP engine needs to know about a molecule beyond its
/// graph: which atoms and bonds to label and which ring/aromatic context
/// applies to them.
///
/// [`Perception::from_mol`] fills every set it can derive from the graph.
/// Atropisomeric axes and helicene overrides come from outside and are left
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Perception {
    /// Candidate stereocenters, processed in this order.
    pub chiral_atoms: Vec<NodeIndex>,
    /// Candidate stereogenic double bonds, processed after the atoms.
    pub chiral_bonds: Vec<EdgeIndex>,
    /// Atoms whose double-bond placement depends on the Kekulé structure.
    pub kekule_ambiguous: HashSet<NodeIndex>,
    /// Bonds inside a ring with fewer than [`SMALL_RING_LIMIT`] members.
    pub small_ring_bonds: HashSet<EdgeIndex>,
    /// Aromatic atoms. A double bond with both ends here never gets E/Z.
    pub aromatic: HashSet<NodeIndex>,
    /// Atoms at either end of a hindered single-bond axis.
    pub atropisomeric: HashSet<NodeIndex>,
    pub helicene_m: HashSet<NodeIndex>,
    pub helicene_p: HashSet<NodeIndex>,
}

impl Perception {
    pub fn from_mol<A, B>(mol: &Mol<A, B>) -> Self
    where
        A: HasAtomicNum + HasHydrogenCount + HasAromaticity,
        B: HasBondOrder,
    {
        let covalent_degree = |idx: NodeIndex| {
            mol.bonds_of(idx)
                .filter(|&e| mol.bond(e).bond_order().is_covalent())
                .count()
        };
        let ligands = |idx: NodeIndex| covalent_degree(idx) + mol.atom(idx).hydrogen_count() as usize;

        let chiral_atoms = mol
            .atoms()
            .filter(|&idx| match ligands(idx) {
                4 => true,
                3 => has_lone_pair_stereo(mol.atom(idx).atomic_num()),
                _ => false,
            })
            .collect();

        let aromatic: HashSet<NodeIndex> = mol
            .atoms()
            .filter(|&idx| mol.atom(idx).is_aromatic())
            .collect();

        let chiral_bonds = mol
            .bonds()
            .filter(|&e| mol.bond(e).bond_order() == BondOrder::Double)
            .filter(|&e| {
                let Some((a, b)) = mol.bond_endpoints(e) else {
                    return false;
                };
                !(aromatic.contains(&a) && aromatic.contains(&b))
                    && ligands(a) >= 2
                    && ligands(b) >= 2
            })
            .collect();

        Self {
            chiral_atoms,
            chiral_bonds,
            kekule_ambiguous: aromatic.clone(),
            small_ring_bonds: small_ring_bonds(mol, SMALL_RING_LIMIT),
            aromatic,
            ..Self::default()
        }
    }

    pub fn is_kekule_ambiguous(&self, atom: NodeIndex) -> bool {
        self.kekule_ambiguous.contains(&atom)
    }

    pub fn is_aromatic_bond(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.aromatic.contains(&a) && self.aromatic.contains(&b)
    }

    pub fn in_small_ring(&self, bond: EdgeIndex) -> bool {
        self.small_ring_bonds.contains(&bond)
    }

    pub fn is_atropisomeric(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.atropisomeric.contains(&a) && self.atropisomeric.contains(&b)
    }
}
