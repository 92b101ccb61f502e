//! File input and output
//!
//! Loading single images and packed NumPy arrays, and writing patches.

pub mod npy_reader;
pub mod image_loader;
pub mod patch_writer;
#[cfg(test)]
pub(crate) mod tests;

pub use npy_reader::{Endianness, NpyHeader, PackedArray};
pub use image_loader::{has_allowed_extension, list_image_files, load_bgr_image};
pub use patch_writer::{patch_file_name, write_patches, write_png};
