#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondOrder {
    /// Non-covalent contact (hydrogen bond, ionic pair). Ignored by the digraph.
    Zero,
    #[default]
    Single,
    Double,
    Triple,
}

impl BondOrder {
    /// Number of shared electron pairs.
    pub fn order(self) -> u8 {
        match self {
            BondOrder::Zero => 0,
            BondOrder::Single => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        }
    }

    pub fn is_covalent(self) -> bool {
        self != BondOrder::Zero
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    pub order: BondOrder,
}

impl Default for Bond {
    fn default() -> Self {
        Self {
            order: BondOrder::Single,
        }
    }
}

impl Bond {
    pub fn double() -> Self {
        Self {
            order: BondOrder::Double,
        }
    }

    pub fn triple() -> Self {
        Self {
            order: BondOrder::Triple,
        }
    }
}

impl crate::traits::HasBondOrder for Bond {
    fn bond_order(&self) -> BondOrder {
        self.order
    }
}
