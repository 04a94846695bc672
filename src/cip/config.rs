/// How the Rule 6 resolver treats promotions that disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rule6Mode {
    /// Disagreeing promotions leave the center without a descriptor.
    #[default]
    Simplified,
    /// Auxiliary descriptors are regenerated for every promotion, and
    /// disagreeing promotions report a pseudoasymmetric r/s.
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipConfig {
    pub rule6: Rule6Mode,
    /// Hard cap on nodes in any single digraph. Exceeding it reports the
    /// center as ambiguous instead of running without bound.
    pub max_digraph_nodes: usize,
}

impl Default for CipConfig {
    fn default() -> Self {
        Self {
            rule6: Rule6Mode::Simplified,
            max_digraph_nodes: 200_000,
        }
    }
}

impl CipConfig {
    pub fn with_rule6(mut self, mode: Rule6Mode) -> Self {
        self.rule6 = mode;
        self
    }

    pub fn with_max_digraph_nodes(mut self, limit: usize) -> Self {
        self.max_digraph_nodes = limit;
        self
    }
}
