//! Cahn–Ingold–Prelog stereodescriptors.
//!
//! Ligands around each stereocenter, double bond and chiral axis are ranked
//! by exploring a hierarchical digraph with sequence rules 1a through 6.
//! The ranking is turned into R/S, r/s, E/Z, seqCis/seqTrans or M/P/m/p
//! through a [`StereoOracle`] that knows the molecule's geometry.
//!
//! ```
//! use cipcrab::{assign_cip, Atom, AtomId, Bond, CipConfig, CipLabel, HasCipLabel, Mol,
//!     TetrahedralStereo, WithCipLabel};
//!
//! let mut mol: Mol<WithCipLabel<Atom>, WithCipLabel<Bond>> = Mol::new();
//! let c = mol.add_atom(Atom::new(6, 1).into());
//! let f = mol.add_atom(Atom::new(9, 0).into());
//! let cl = mol.add_atom(Atom::new(17, 0).into());
//! let br = mol.add_atom(Atom::new(35, 0).into());
//! for x in [f, cl, br] {
//!     mol.add_bond(c, x, Bond::default().into());
//! }
//! mol.add_tetrahedral_stereo(TetrahedralStereo {
//!     center: c,
//!     above: [AtomId::VirtualH(c, 0), AtomId::Node(f), AtomId::Node(cl), AtomId::Node(br)],
//! });
//!
//! assign_cip(&mut mol, &CipConfig::default());
//! assert_eq!(mol.atom(c).cip_label().map(|d| d.label), Some(CipLabel::S));
//! ```

mod alkene;
mod auxiliary;
mod config;
mod digraph;
mod engine;
mod error;
mod label;
mod mass;
mod mata;
mod oracle;
mod perception;
mod rule6;
mod rules;
mod sort;
mod topology;

use std::collections::HashMap;

use petgraph::graph::{EdgeIndex, NodeIndex};

pub use config::{CipConfig, Rule6Mode};
pub use error::CipError;
pub use label::{CipDescriptor, CipLabel, Rule};
pub use oracle::{BondSide, Handedness, StereoOracle};
pub use perception::{Perception, SMALL_RING_LIMIT};

use crate::mol::Mol;
use crate::traits::{
    HasAromaticity, HasAtomicNum, HasBondOrder, HasCipLabel, HasHydrogenCount, HasIsotope,
};
use engine::Env;
use topology::Topology;

/// Descriptors found by one labelling run.
///
/// Plain double bonds and cumulenes with an odd number of double bonds are
/// reported on their central bond. Allenes and other even cumulenes are
/// reported on their central atom, atropisomeric axes on the hindered bond.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CipResults {
    pub atoms: HashMap<NodeIndex, CipDescriptor>,
    pub bonds: HashMap<EdgeIndex, CipDescriptor>,
}

impl CipResults {
    pub fn atom(&self, idx: NodeIndex) -> Option<CipDescriptor> {
        self.atoms.get(&idx).copied()
    }

    pub fn bond(&self, idx: EdgeIndex) -> Option<CipDescriptor> {
        self.bonds.get(&idx).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty() && self.bonds.is_empty()
    }

    /// Writes the descriptors onto the molecule, clearing labels on every
    /// other atom and bond.
    pub fn apply<A, B>(&self, mol: &mut Mol<A, B>)
    where
        A: HasCipLabel,
        B: HasCipLabel,
    {
        let atoms: Vec<NodeIndex> = mol.atoms().collect();
        for idx in atoms {
            mol.atom_mut(idx).set_cip_label(self.atom(idx));
        }
        let bonds: Vec<EdgeIndex> = mol.bonds().collect();
        for idx in bonds {
            mol.bond_mut(idx).set_cip_label(self.bond(idx));
        }
    }
}

/// Computes descriptors for every candidate in `perception`, asking
/// `oracle` for geometry.
pub fn compute_cip<A, B, O>(
    mol: &Mol<A, B>,
    perception: &Perception,
    oracle: &O,
    config: &CipConfig,
) -> CipResults
where
    A: HasAtomicNum + HasIsotope + HasHydrogenCount,
    B: HasBondOrder,
    O: StereoOracle,
{
    let topology = Topology::from_mol(mol);
    let env = Env::new(&topology, perception, oracle, config);
    engine::assign_all(&env)
}

/// Perceives candidates from the molecule's graph, answers geometry from its
/// stored stereo annotations and writes the descriptors back onto it.
pub fn assign_cip<A, B>(mol: &mut Mol<A, B>, config: &CipConfig) -> CipResults
where
    A: HasAtomicNum + HasIsotope + HasHydrogenCount + HasAromaticity + HasCipLabel,
    B: HasBondOrder + HasCipLabel,
{
    let perception = Perception::from_mol(&*mol);
    let results = compute_cip(&*mol, &perception, &*mol, config);
    results.apply(mol);
    results
}
