//! Periodic table lookups used by the CIP rules.

/// Element symbol for an atomic number in `1..=118`.
pub fn symbol(atomic_num: u8) -> Option<&'static str> {
    index(atomic_num).map(|i| SYMBOLS[i])
}

/// Atomic number for an exact, case-sensitive element symbol.
pub fn from_symbol(s: &str) -> Option<u8> {
    SYMBOLS
        .iter()
        .position(|&sym| sym == s)
        .map(|i| i as u8 + 1)
}

/// Standard atomic weight in daltons; the longest-lived isotope for
/// elements without a stable one.
pub fn atomic_weight(atomic_num: u8) -> Option<f64> {
    index(atomic_num).map(|i| ATOMIC_WEIGHTS[i])
}

/// Elements that keep a configuration-stable lone pair when three-coordinate
/// (amines on bridgeheads, phosphines, sulfoxides, selenoxides, ...).
pub fn has_lone_pair_stereo(atomic_num: u8) -> bool {
    matches!(atomic_num, 7 | 15 | 16 | 33 | 34 | 52)
}

fn index(atomic_num: u8) -> Option<usize> {
    match atomic_num {
        1..=118 => Some(atomic_num as usize - 1),
        _ => None,
    }
}

static SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca",
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr",
    "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn",
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd",
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb",
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th",
    "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm",
    "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds",
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

#[rustfmt::skip]
static ATOMIC_WEIGHTS: [f64; 118] = [
    // H..Ne
    1.008, 4.002602, 6.941, 9.0121831, 10.81,
    12.011, 14.007, 15.999, 18.998403163, 20.1797,
    // Na..Ca
    22.98976928, 24.305, 26.9815384, 28.085, 30.973761998,
    32.06, 35.45, 39.948, 39.0983, 40.078,
    // Sc..Zn
    44.955908, 47.867, 50.9415, 51.9961, 54.938043,
    55.845, 58.933194, 58.6934, 63.546, 65.38,
    // Ga..Zr
    69.723, 72.630, 74.921595, 78.971, 79.904,
    83.798, 85.4678, 87.62, 88.90584, 91.224,
    // Nb..Sn
    92.90637, 95.95, 97.0, 101.07, 102.90549,
    106.42, 107.8682, 112.414, 114.818, 118.710,
    // Sb..Nd
    121.760, 127.60, 126.90447, 131.293, 132.90545196,
    137.327, 138.90547, 140.116, 140.90766, 144.242,
    // Pm..Yb
    145.0, 150.36, 151.964, 157.25, 158.925354,
    162.500, 164.930328, 167.259, 168.934218, 173.045,
    // Lu..Hg
    174.9668, 178.486, 180.94788, 183.84, 186.207,
    190.23, 192.217, 195.084, 196.966570, 200.592,
    // Tl..Th
    204.38, 207.2, 208.98040, 209.0, 210.0,
    222.0, 223.0, 226.0, 227.0, 232.0377,
    // Pa..Fm
    231.03588, 238.02891, 237.0, 244.0, 243.0,
    247.0, 247.0, 251.0, 252.0, 257.0,
    // Md..Ds
    258.0, 259.0, 266.0, 267.0, 268.0,
    269.0, 270.0, 277.0, 278.0, 281.0,
    // Rg..Og
    282.0, 285.0, 286.0, 289.0, 290.0,
    293.0, 294.0, 294.0,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_lookup_round_trips() {
        for n in 1u8..=118 {
            let sym = symbol(n).unwrap();
            assert_eq!(from_symbol(sym), Some(n));
        }
        assert_eq!(symbol(0), None);
        assert_eq!(symbol(119), None);
        assert_eq!(from_symbol("cl"), None);
    }

    #[test]
    fn weights_follow_expected_anchors() {
        assert_eq!(atomic_weight(1), Some(1.008));
        assert_eq!(atomic_weight(6), Some(12.011));
        assert_eq!(atomic_weight(53), Some(126.90447));
        assert_eq!(atomic_weight(118), Some(294.0));
        assert_eq!(atomic_weight(0), None);
    }

    #[test]
    fn argon_outweighs_potassium() {
        assert!(atomic_weight(18).unwrap() > atomic_weight(19).unwrap());
    }

    #[test]
    fn lone_pair_elements() {
        assert!(has_lone_pair_stereo(7));
        assert!(has_lone_pair_stereo(16));
        assert!(!has_lone_pair_stereo(6));
        assert!(!has_lone_pair_stereo(8));
    }
}
