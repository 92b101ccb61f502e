//! Preparation settings
//!
//! Every tunable of the pipeline lives in [`PrepConfig`]. Defaults are read
//! from the TOML file embedded at build time; a user file only has to list
//! the keys it wants to change.

mod prep_config;
#[cfg(test)]
mod tests;

pub use prep_config::{DatasetPaths, PatchConfig, PrepConfig, SplitConfig};
