//! Rule 2 masses.
//!
//! An explicit mass number outranks the natural-abundance average of the same
//! element only when it is heavier than that average. Two tables keep the
//! comparison honest where the mass number and the average coincide or are
//! inverted.

use crate::element::atomic_weight;

/// Elements with a single naturally occurring nuclide, as `(atomic number,
/// mass number)`. Labelling such an atom with its only mass number carries no
/// isotopic information, so it ranks like an unlabelled atom.
const MONONUCLIDIC: [(u8, u16); 30] = [
    (4, 9),
    (9, 19),
    (11, 23),
    (13, 27),
    (15, 31),
    (21, 45),
    (25, 55),
    (27, 59),
    (33, 75),
    (39, 89),
    (41, 93),
    (43, 98),
    (45, 103),
    (53, 127),
    (55, 133),
    (59, 141),
    (61, 145),
    (65, 159),
    (67, 165),
    (69, 169),
    (79, 197),
    (83, 209),
    (84, 209),
    (85, 210),
    (86, 222),
    (87, 223),
    (88, 226),
    (89, 227),
    (90, 232),
    (91, 231),
];

/// Nuclides whose mass number is at or just above the element's average
/// weight even though they are the lightest or dominant nuclide. They rank
/// just below the average.
const BELOW_AVERAGE: [(u8, u16); 4] = [(8, 16), (24, 52), (42, 96), (71, 175)];

fn is_mononuclidic(atomic_num: u8, isotope: u16) -> bool {
    if MONONUCLIDIC.contains(&(atomic_num, isotope)) {
        return true;
    }
    // No stable nuclides past uranium; the tabulated weight is the
    // longest-lived mass number.
    atomic_num > 92
        && atomic_weight(atomic_num).is_some_and(|w| w.round() as u16 == isotope)
}

/// Rule 2 mass of an atom. Duplicates always use the average weight.
pub(crate) fn rule2_mass(atomic_num: u8, isotope: u16, duplicate: bool) -> f64 {
    let average = atomic_weight(atomic_num).unwrap_or(0.0);
    if duplicate || isotope == 0 || is_mononuclidic(atomic_num, isotope) {
        return average;
    }
    if BELOW_AVERAGE.contains(&(atomic_num, isotope)) {
        return isotope as f64 - 0.1;
    }
    isotope as f64
}
