use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::element::has_lone_pair_stereo;
use crate::mol::Mol;
use crate::traits::{HasAtomicNum, HasBondOrder, HasHydrogenCount, HasIsotope};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AtomFacts {
    pub atomic_num: u8,
    pub isotope: u16,
    pub implicit_h: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Neighbor {
    pub atom: NodeIndex,
    pub bond: EdgeIndex,
    pub order: u8,
}

/// The covalent skeleton the digraph is built from.
#[derive(Debug, Clone)]
pub(crate) struct Topology {
    atoms: Vec<AtomFacts>,
    neighbors: Vec<Vec<Neighbor>>,
    bonds: Vec<Option<(NodeIndex, NodeIndex, u8)>>,
    hypervalent: Vec<bool>,
    has_isotopes: bool,
}

impl Topology {
    pub fn from_mol<A, B>(mol: &Mol<A, B>) -> Self
    where
        A: HasAtomicNum + HasIsotope + HasHydrogenCount,
        B: HasBondOrder,
    {
        let atoms: Vec<AtomFacts> = mol
            .atoms()
            .map(|idx| {
                let atom = mol.atom(idx);
                AtomFacts {
                    atomic_num: atom.atomic_num(),
                    isotope: atom.isotope(),
                    implicit_h: atom.hydrogen_count(),
                }
            })
            .collect();

        let mut neighbors = vec![Vec::new(); atoms.len()];
        let mut bonds = vec![None; mol.bond_count()];
        for bond in mol.bonds() {
            let order = mol.bond(bond).bond_order();
            if !order.is_covalent() {
                continue;
            }
            let Some((a, b)) = mol.bond_endpoints(bond) else {
                continue;
            };
            let order = order.order();
            neighbors[a.index()].push(Neighbor { atom: b, bond, order });
            neighbors[b.index()].push(Neighbor { atom: a, bond, order });
            bonds[bond.index()] = Some((a, b, order));
        }

        // Beyond the first row a multiple bond on an atom that already has
        // three or more ligands (P=O, sulfoxide and sulfone S=O, Cl=O) is
        // read as a single bond, leaving room for a lone pair.
        let hypervalent = atoms
            .iter()
            .zip(&neighbors)
            .map(|(facts, nbrs)| {
                let ligands = nbrs.len() + facts.implicit_h as usize;
                let multiple = nbrs.iter().any(|n| n.order > 1);
                facts.atomic_num > 10 && ligands >= 3 && multiple
            })
            .collect();

        let has_isotopes = atoms.iter().any(|a| a.isotope != 0);

        Self {
            atoms,
            neighbors,
            bonds,
            hypervalent,
            has_isotopes,
        }
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn contains(&self, atom: NodeIndex) -> bool {
        atom.index() < self.atoms.len()
    }

    pub fn facts(&self, atom: NodeIndex) -> AtomFacts {
        self.atoms[atom.index()]
    }

    pub fn atomic_num(&self, atom: NodeIndex) -> u8 {
        self.atoms[atom.index()].atomic_num
    }

    pub fn neighbors(&self, atom: NodeIndex) -> &[Neighbor] {
        &self.neighbors[atom.index()]
    }

    /// Endpoints and order of a covalent bond.
    pub fn bond(&self, bond: EdgeIndex) -> Option<(NodeIndex, NodeIndex, u8)> {
        self.bonds.get(bond.index()).copied().flatten()
    }

    pub fn neighbor(&self, atom: NodeIndex, other: NodeIndex) -> Option<Neighbor> {
        self.neighbors(atom).iter().copied().find(|n| n.atom == other)
    }

    /// Number of ligands including suppressed hydrogens.
    pub fn ligand_count(&self, atom: NodeIndex) -> usize {
        self.neighbors(atom).len() + self.atoms[atom.index()].implicit_h as usize
    }

    /// Four ligands, or three around an atom whose lone pair counts as the
    /// fourth, with at most one unlabelled hydrogen.
    pub fn is_tetrahedral_candidate(&self, atom: NodeIndex) -> bool {
        let shape = match self.ligand_count(atom) {
            4 => true,
            3 => has_lone_pair_stereo(self.atomic_num(atom)),
            _ => false,
        };
        shape && self.hydrogen_count(atom) <= 1
    }

    /// Unlabelled hydrogens on `atom`, explicit neighbours included. Labelled
    /// hydrogens (D, T) are told apart by Rule 2 and are not counted.
    pub fn hydrogen_count(&self, atom: NodeIndex) -> usize {
        let explicit = self
            .neighbors(atom)
            .iter()
            .filter(|n| {
                let facts = self.facts(n.atom);
                facts.atomic_num == 1 && facts.isotope == 0
            })
            .count();
        explicit + self.atoms[atom.index()].implicit_h as usize
    }

    /// Duplicate atoms a bond of `order` between `a` and `b` contributes on
    /// each side.
    pub fn duplicates_for(&self, a: NodeIndex, b: NodeIndex, order: u8) -> usize {
        if self.hypervalent[a.index()] || self.hypervalent[b.index()] {
            return 0;
        }
        order.saturating_sub(1) as usize
    }

    /// Double bond between two atoms no heavier than neon.
    pub fn is_alkene_bond(&self, a: NodeIndex, b: NodeIndex, order: u8) -> bool {
        order == 2 && self.atomic_num(a) <= 10 && self.atomic_num(b) <= 10
    }

    /// Partners of `atom` across double bonds.
    pub fn double_bond_partners(&self, atom: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.neighbors(atom)
            .iter()
            .filter(move |n| self.is_alkene_bond(atom, n.atom, n.order))
            .map(|n| n.atom)
    }

    pub fn single_bonds(&self) -> impl Iterator<Item = (EdgeIndex, NodeIndex, NodeIndex)> + '_ {
        self.bonds.iter().enumerate().filter_map(|(i, bond)| match bond {
            Some((a, b, 1)) => Some((EdgeIndex::new(i), *a, *b)),
            _ => None,
        })
    }

    pub fn has_isotopes(&self) -> bool {
        self.has_isotopes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Atom, Bond, BondOrder};

    #[test]
    fn zero_order_bonds_are_ignored() {
        let mut mol = Mol::<Atom, Bond>::new();
        let n = mol.add_atom(Atom::new(7, 3));
        let o = mol.add_atom(Atom::new(8, 1));
        mol.add_bond(n, o, Bond { order: BondOrder::Zero });
        let topo = Topology::from_mol(&mol);
        assert!(topo.neighbors(n).is_empty());
        assert_eq!(topo.ligand_count(n), 3);
    }

    #[test]
    fn tetrahedral_candidates_from_skeleton() {
        let mut mol = Mol::<Atom, Bond>::new();
        let c = mol.add_atom(Atom::new(6, 1));
        let me = mol.add_atom(Atom::new(6, 3));
        let f = mol.add_atom(Atom::new(9, 0));
        let s = mol.add_atom(Atom::new(16, 0));
        let o = mol.add_atom(Atom::new(8, 0));
        let et = mol.add_atom(Atom::new(6, 3));
        mol.add_bond(c, me, Bond::default());
        mol.add_bond(c, f, Bond::default());
        mol.add_bond(c, s, Bond::default());
        mol.add_bond(s, o, Bond::double());
        mol.add_bond(s, et, Bond::default());
        let topo = Topology::from_mol(&mol);
        assert!(topo.is_tetrahedral_candidate(c));
        assert!(topo.is_tetrahedral_candidate(s));
        assert!(!topo.is_tetrahedral_candidate(me));
        assert!(!topo.is_tetrahedral_candidate(o));
    }

    #[test]
    fn phosphoryl_double_bond_gets_no_duplicates() {
        let mut mol = Mol::<Atom, Bond>::new();
        let p = mol.add_atom(Atom::new(15, 0));
        let o = mol.add_atom(Atom::new(8, 0));
        mol.add_bond(p, o, Bond::double());
        for _ in 0..3 {
            let r = mol.add_atom(Atom::new(8, 1));
            mol.add_bond(p, r, Bond::default());
        }
        let topo = Topology::from_mol(&mol);
        assert_eq!(topo.duplicates_for(p, o, 2), 0);
        assert!(!topo.is_alkene_bond(p, o, 2));
    }

    #[test]
    fn sulfoxide_double_bond_gets_no_duplicates() {
        let mut mol = Mol::<Atom, Bond>::new();
        let s = mol.add_atom(Atom::new(16, 0));
        let o = mol.add_atom(Atom::new(8, 0));
        let a = mol.add_atom(Atom::new(6, 3));
        let b = mol.add_atom(Atom::new(6, 2));
        let so = mol.add_bond(s, o, Bond::double());
        mol.add_bond(s, a, Bond::default());
        mol.add_bond(s, b, Bond::default());
        let topo = Topology::from_mol(&mol);
        assert_eq!(topo.duplicates_for(s, o, 2), 0);
        assert_eq!(topo.bond(so), Some((s, o, 2)));
    }

    #[test]
    fn thiocarbonyl_keeps_duplicates() {
        let mut mol = Mol::<Atom, Bond>::new();
        let c = mol.add_atom(Atom::new(6, 0));
        let s = mol.add_atom(Atom::new(16, 0));
        mol.add_bond(c, s, Bond::double());
        for _ in 0..2 {
            let n = mol.add_atom(Atom::new(7, 2));
            mol.add_bond(c, n, Bond::default());
        }
        let topo = Topology::from_mol(&mol);
        assert_eq!(topo.duplicates_for(c, s, 2), 1);
    }

    #[test]
    fn carbonyl_keeps_duplicates() {
        let mut mol = Mol::<Atom, Bond>::new();
        let c = mol.add_atom(Atom::new(6, 2));
        let o = mol.add_atom(Atom::new(8, 0));
        mol.add_bond(c, o, Bond::double());
        let topo = Topology::from_mol(&mol);
        assert_eq!(topo.duplicates_for(c, o, 2), 1);
        assert_eq!(topo.duplicates_for(c, o, 3), 2);
        assert!(topo.is_alkene_bond(c, o, 2));
        assert!(!topo.has_isotopes());
    }

    #[test]
    fn hydrogen_count_skips_labelled_hydrogens() {
        let mut mol = Mol::<Atom, Bond>::new();
        let c = mol.add_atom(Atom::new(6, 2));
        let h = mol.add_atom(Atom {
            atomic_num: 1,
            isotope: 2,
            ..Atom::default()
        });
        mol.add_bond(c, h, Bond::default());
        let topo = Topology::from_mol(&mol);
        assert_eq!(topo.hydrogen_count(c), 2);
        assert_eq!(topo.ligand_count(c), 3);
        assert!(topo.has_isotopes());
    }
}
