use crate::bond::BondOrder;
use crate::cip::CipDescriptor;

pub trait HasAtomicNum {
    fn atomic_num(&self) -> u8;
}

pub trait HasIsotope {
    fn isotope(&self) -> u16;
}

pub trait HasHydrogenCount {
    fn hydrogen_count(&self) -> u8;
}

pub trait HasAromaticity {
    fn is_aromatic(&self) -> bool;
}

pub trait HasBondOrder {
    fn bond_order(&self) -> BondOrder;
}

/// Result sink for stereodescriptors on atoms and bonds.
pub trait HasCipLabel {
    fn cip_label(&self) -> Option<CipDescriptor>;
    fn set_cip_label(&mut self, label: Option<CipDescriptor>);
}
