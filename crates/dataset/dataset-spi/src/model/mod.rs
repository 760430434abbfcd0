//! Data models for labelled datasets.

mod dataset;
mod group;
mod label_rule;

pub use dataset::Dataset;
pub use group::Group;
pub use label_rule::LabelRule;
