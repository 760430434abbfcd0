//! Dataset preparation configuration.
//!
//! Every section has defaults so a partial TOML file is valid.

mod config;

pub use config::{
    GraphConfig, HttpConfig, PrepareConfig, PrepareConfigBuilder, SourceUrls, ToyConfig,
};
