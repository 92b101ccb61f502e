//! Patch extraction
//!
//! This module slides a square window over an image and keeps the windows
//! that look like tissue rather than empty slide background.

mod region;
mod patch_extractor;
#[cfg(test)]
mod tests;

pub use region::Region;
pub use patch_extractor::{tissue_ratio, PatchExtractor};
