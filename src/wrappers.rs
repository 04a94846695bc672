use crate::cip::CipDescriptor;
use crate::traits::*;

/// Adds a stereodescriptor slot to an atom or bond type.
///
/// ```
/// use cipcrab::{Atom, HasAtomicNum, HasCipLabel, WithCipLabel};
///
/// let atom = WithCipLabel::new(Atom::new(6, 1));
/// assert_eq!(atom.atomic_num(), 6);
/// assert_eq!(atom.cip_label(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WithCipLabel<T> {
    pub inner: T,
    pub cip_label: Option<CipDescriptor>,
}

impl<T> WithCipLabel<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            cip_label: None,
        }
    }
}

impl<T> From<T> for WithCipLabel<T> {
    fn from(inner: T) -> Self {
        Self::new(inner)
    }
}

impl<T> HasCipLabel for WithCipLabel<T> {
    fn cip_label(&self) -> Option<CipDescriptor> {
        self.cip_label
    }
    fn set_cip_label(&mut self, label: Option<CipDescriptor>) {
        self.cip_label = label;
    }
}

macro_rules! delegate_trait {
    ($wrapper:ident, $trait:ident, $method:ident, $ret:ty) => {
        impl<T: $trait> $trait for $wrapper<T> {
            fn $method(&self) -> $ret {
                self.inner.$method()
            }
        }
    };
}

macro_rules! delegate_common {
    ($wrapper:ident) => {
        delegate_trait!($wrapper, HasAtomicNum, atomic_num, u8);
        delegate_trait!($wrapper, HasIsotope, isotope, u16);
        delegate_trait!($wrapper, HasHydrogenCount, hydrogen_count, u8);
        delegate_trait!($wrapper, HasAromaticity, is_aromatic, bool);
        delegate_trait!($wrapper, HasBondOrder, bond_order, crate::bond::BondOrder);
    };
}

delegate_common!(WithCipLabel);
