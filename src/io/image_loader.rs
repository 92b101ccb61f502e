//! Single-file image loading and directory listing

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader};
use log::debug;

use crate::errors::{PrepError, PrepResult};
use crate::pixels::BgrImage;

/// Decode a PNG, TIFF or JPEG file into BGR pixels
///
/// The format is taken from the file content, not its extension. Returns
/// `None` when the file is missing or cannot be decoded; the caller is
/// expected to skip it.
pub fn load_bgr_image(path: &Path) -> Option<BgrImage> {
    if !path.exists() {
        debug!("Skipping {}: file not found", path.display());
        return None;
    }

    match decode_sniffed(path) {
        Ok(img) => Some(BgrImage::from_rgb_image(img.to_rgb8())),
        Err(e) => {
            debug!("Skipping {}: {}", path.display(), e);
            None
        }
    }
}

fn decode_sniffed(path: &Path) -> PrepResult<DynamicImage> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    Ok(reader.decode()?)
}

/// Whether the file name ends with one of the allowed extensions
///
/// Matching is case-insensitive; `extensions` are lowercase without a dot.
pub fn has_allowed_extension(path: &Path, extensions: &[String]) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.to_lowercase(),
        None => return false,
    };
    extensions.iter().any(|ext| name.ends_with(&format!(".{}", ext)))
}

/// List the image files directly inside `dir`, sorted by name
pub fn list_image_files(dir: &Path, extensions: &[String]) -> PrepResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(PrepError::MissingPath(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if has_allowed_extension(&path, extensions) {
            files.push(path);
        }
    }
    files.sort();

    debug!("Found {} candidate images in {}", files.len(), dir.display());
    Ok(files)
}
