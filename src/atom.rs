/// Default atom type for a molecular graph node.
///
/// `Atom` stores the intrinsic properties the CIP rules read off a structure:
/// element, mass number, suppressed hydrogens and aromaticity. Computed
/// results such as stereodescriptors are attached with wrapper types from the
/// [`wrappers`](crate::wrappers) module.
///
/// # Examples
///
/// ```
/// use cipcrab::Atom;
///
/// let carbon = Atom {
///     atomic_num: 6,
///     isotope: 13,
///     hydrogen_count: 3,
///     is_aromatic: false,
/// };
/// assert_eq!(carbon.atomic_num, 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Atom {
    /// Atomic number (1 = H, 6 = C, 7 = N, …). Identifies the element.
    pub atomic_num: u8,
    /// Mass number. `0` means natural isotopic abundance (the common case).
    ///
    /// Rule 2 ranks explicit mass numbers above the average atomic weight of
    /// the same element, except where the element has a single stable nuclide.
    pub isotope: u16,
    /// Number of virtual (suppressed) hydrogens on this atom.
    ///
    /// These are not graph nodes. Stereo annotations refer to them through
    /// [`AtomId::VirtualH`](crate::AtomId::VirtualH).
    pub hydrogen_count: u8,
    /// Whether this atom is in an aromatic ring.
    ///
    /// Aromatic atoms are treated as Kekulé-ambiguous: the duplicate atoms
    /// created for their double bonds carry an averaged element number.
    pub is_aromatic: bool,
}

impl Atom {
    /// Shorthand for an atom of element `atomic_num` with `hydrogen_count`
    /// suppressed hydrogens.
    pub fn new(atomic_num: u8, hydrogen_count: u8) -> Self {
        Self {
            atomic_num,
            hydrogen_count,
            ..Self::default()
        }
    }
}

impl crate::traits::HasAtomicNum for Atom {
    fn atomic_num(&self) -> u8 {
        self.atomic_num
    }
}

impl crate::traits::HasIsotope for Atom {
    fn isotope(&self) -> u16 {
        self.isotope
    }
}

impl crate::traits::HasHydrogenCount for Atom {
    fn hydrogen_count(&self) -> u8 {
        self.hydrogen_count
    }
}

impl crate::traits::HasAromaticity for Atom {
    fn is_aromatic(&self) -> bool {
        self.is_aromatic
    }
}
