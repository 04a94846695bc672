use std::fmt;

/// The CIP sequence rules, in the order they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rule {
    /// Higher atomic number precedes lower.
    R1a,
    /// A duplicate closer to the root precedes one farther away.
    R1b,
    /// Higher mass precedes lower.
    R2,
    /// seqCis precedes seqTrans precedes non-stereogenic.
    R3,
    /// Chiral precedes pseudoasymmetric precedes non-stereogenic.
    R4a,
    /// Like descriptor pairs precede unlike pairs.
    R4b,
    /// r precedes s, m precedes p.
    R4c,
    /// R precedes S, M precedes P.
    R5,
    /// The promoted reference ligand precedes the others.
    R6,
}

impl Rule {
    pub const ALL: [Rule; 9] = [
        Rule::R1a,
        Rule::R1b,
        Rule::R2,
        Rule::R3,
        Rule::R4a,
        Rule::R4b,
        Rule::R4c,
        Rule::R5,
        Rule::R6,
    ];

    /// Rules decided on whole ligand sequences at the root, never by
    /// exploring past a tie.
    pub(crate) fn ignores_ties(self) -> bool {
        matches!(self, Rule::R4b | Rule::R5)
    }

    /// Rules that need every node of the tree ranked at its own level first.
    pub(crate) fn presorts(self) -> bool {
        matches!(self, Rule::R4a | Rule::R4b | Rule::R4c | Rule::R5)
    }

    pub fn name(self) -> &'static str {
        match self {
            Rule::R1a => "1a",
            Rule::R1b => "1b",
            Rule::R2 => "2",
            Rule::R3 => "3",
            Rule::R4a => "4a",
            Rule::R4b => "4b",
            Rule::R4c => "4c",
            Rule::R5 => "5",
            Rule::R6 => "6",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule {}", self.name())
    }
}

/// A stereodescriptor as reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipLabel {
    R,
    S,
    /// `r`: pseudoasymmetric center.
    PseudoR,
    /// `s`: pseudoasymmetric center.
    PseudoS,
    M,
    P,
    /// `m`: pseudoasymmetric axis.
    PseudoM,
    /// `p`: pseudoasymmetric axis.
    PseudoP,
    E,
    Z,
    SeqCis,
    SeqTrans,
    /// The center was stereogenic but could not be resolved to one handedness.
    Ambiguous,
}

impl CipLabel {
    pub fn symbol(self) -> &'static str {
        match self {
            CipLabel::R => "R",
            CipLabel::S => "S",
            CipLabel::PseudoR => "r",
            CipLabel::PseudoS => "s",
            CipLabel::M => "M",
            CipLabel::P => "P",
            CipLabel::PseudoM => "m",
            CipLabel::PseudoP => "p",
            CipLabel::E => "E",
            CipLabel::Z => "Z",
            CipLabel::SeqCis => "seqCis",
            CipLabel::SeqTrans => "seqTrans",
            CipLabel::Ambiguous => "RS",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Self> {
        let label = match s {
            "R" => CipLabel::R,
            "S" => CipLabel::S,
            "r" => CipLabel::PseudoR,
            "s" => CipLabel::PseudoS,
            "M" => CipLabel::M,
            "P" => CipLabel::P,
            "m" => CipLabel::PseudoM,
            "p" => CipLabel::PseudoP,
            "E" => CipLabel::E,
            "Z" => CipLabel::Z,
            "seqCis" => CipLabel::SeqCis,
            "seqTrans" => CipLabel::SeqTrans,
            "RS" => CipLabel::Ambiguous,
            _ => return None,
        };
        Some(label)
    }

    /// The mirror-image descriptor. Pseudo labels and E/Z are unchanged by
    /// reflection.
    pub fn mirrored(self) -> Self {
        match self {
            CipLabel::R => CipLabel::S,
            CipLabel::S => CipLabel::R,
            CipLabel::M => CipLabel::P,
            CipLabel::P => CipLabel::M,
            other => other,
        }
    }
}

impl fmt::Display for CipLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A descriptor together with the rule that settled it.
///
/// `rule` is `None` for caller-supplied overrides (helicenes) and for
/// [`CipLabel::Ambiguous`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CipDescriptor {
    pub label: CipLabel,
    pub rule: Option<Rule>,
}

impl CipDescriptor {
    pub fn new(label: CipLabel, rule: Rule) -> Self {
        Self {
            label,
            rule: Some(rule),
        }
    }

    pub fn ambiguous() -> Self {
        Self {
            label: CipLabel::Ambiguous,
            rule: None,
        }
    }
}

impl fmt::Display for CipDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rule {
            Some(rule) => write!(f, "{} ({})", self.label, rule),
            None => write!(f, "{}", self.label),
        }
    }
}

/// Auxiliary chirality carried by a digraph node. Axial M/P and m/p are
/// folded into R/S and r/s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum AuxChirality {
    R,
    S,
    PseudoR,
    PseudoS,
}

impl AuxChirality {
    pub fn is_pseudo(self) -> bool {
        matches!(self, AuxChirality::PseudoR | AuxChirality::PseudoS)
    }

    /// `true` for R and r.
    pub fn is_r_like(self) -> bool {
        matches!(self, AuxChirality::R | AuxChirality::PseudoR)
    }

    pub fn from_label(label: CipLabel) -> Option<Self> {
        match label {
            CipLabel::R | CipLabel::M => Some(AuxChirality::R),
            CipLabel::S | CipLabel::P => Some(AuxChirality::S),
            CipLabel::PseudoR | CipLabel::PseudoM => Some(AuxChirality::PseudoR),
            CipLabel::PseudoS | CipLabel::PseudoP => Some(AuxChirality::PseudoS),
            _ => None,
        }
    }
}

/// Auxiliary double-bond geometry used by Rule 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum AuxEz {
    SeqCis,
    SeqTrans,
}

impl AuxEz {
    pub fn from_label(label: CipLabel) -> Option<Self> {
        match label {
            CipLabel::Z | CipLabel::SeqCis => Some(AuxEz::SeqCis),
            CipLabel::E | CipLabel::SeqTrans => Some(AuxEz::SeqTrans),
            _ => None,
        }
    }
}
