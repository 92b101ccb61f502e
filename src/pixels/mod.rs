//! In-memory pixel representations
//!
//! Raw samples as they come out of a packed array, the rule that turns them
//! into bytes, and the 8-bit BGR image every later stage works on.

mod raw_image;
mod normalizer;
mod bgr_image;
#[cfg(test)]
mod tests;

pub use raw_image::{RawImage, SampleType, Samples};
pub use normalizer::{choose_normalization, normalize, Normalization};
pub use bgr_image::{bgr_to_gray, BgrImage};
