use thiserror::Error;

/// Faults while ranking one stereogenic unit. The driver reports the unit as
/// [`CipLabel::Ambiguous`](super::CipLabel::Ambiguous) and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipError {
    /// The digraph for `atom` needed more than
    /// [`CipConfig::max_digraph_nodes`](super::CipConfig::max_digraph_nodes).
    #[error("hierarchical digraph rooted at atom {atom} grew past {limit} nodes")]
    DigraphTooLarge { atom: usize, limit: usize },

    /// An atom index outside the molecule.
    #[error("atom {0} is not part of the molecule")]
    UnknownAtom(usize),

    /// A bond index outside the molecule, or a non-covalent bond.
    #[error("bond {0} is not part of the molecule")]
    UnknownBond(usize),
}
