//! Output groups.

use serde::{Deserialize, Serialize};

/// Family of datasets sharing one output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    /// UCI and KDD tabular corpora
    Real,
    /// Synthetic geometries with uniform noise
    Toy,
    /// Small illustrative datasets
    Examples,
    /// Edge streams unpacked from bundled archives
    Graph,
    /// Numenta Anomaly Benchmark series and labels
    Nab,
}

impl Group {
    /// All groups in execution order.
    pub const ALL: [Group; 5] = [
        Group::Real,
        Group::Toy,
        Group::Examples,
        Group::Graph,
        Group::Nab,
    ];

    /// Sub-directory below the output root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Group::Real => "real",
            Group::Toy => "toy",
            Group::Examples => "examples",
            Group::Graph => "graph",
            Group::Nab => "nab",
        }
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}
