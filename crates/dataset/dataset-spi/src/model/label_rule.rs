//! Class-label selection for multi-class corpora.

use serde::{Deserialize, Serialize};

/// Maps integer class labels onto the normal / anomalous split.
///
/// Classes in neither list are dropped from the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRule {
    pub normal: Vec<i64>,
    pub anomalous: Vec<i64>,
}

impl LabelRule {
    pub fn new(normal: Vec<i64>, anomalous: Vec<i64>) -> Self {
        Self { normal, anomalous }
    }

    /// `Some(true)` for anomalous classes, `Some(false)` for normal ones,
    /// `None` when the row should be dropped.
    pub fn classify(&self, class: i64) -> Option<bool> {
        if self.anomalous.contains(&class) {
            Some(true)
        } else if self.normal.contains(&class) {
            Some(false)
        } else {
            None
        }
    }
}
