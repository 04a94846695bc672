pub mod atom;
pub mod bond;
pub mod cip;
pub mod element;
pub mod mol;
pub mod rings;
pub mod traits;
pub mod wrappers;

pub use atom::Atom;
pub use bond::{Bond, BondOrder};
pub use cip::{
    assign_cip, compute_cip, BondSide, CipConfig, CipDescriptor, CipError, CipLabel, CipResults,
    Handedness, Perception, Rule, Rule6Mode, StereoOracle,
};
pub use mol::{AtomId, AxialStereo, EZStereo, Mol, TetrahedralStereo, Torsion};
pub use traits::{
    HasAromaticity, HasAtomicNum, HasBondOrder, HasCipLabel, HasHydrogenCount, HasIsotope,
};
pub use wrappers::WithCipLabel;

#[cfg(test)]
mod tests;
