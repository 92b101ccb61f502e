//! PNG output with sequential file names

use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use log::info;

use crate::errors::PrepResult;
use crate::pixels::BgrImage;
use crate::utils::progress::ProgressTracker;

/// `<prefix>_<index>.png` with the index zero-padded to six digits
pub fn patch_file_name(prefix: &str, index: usize) -> String {
    format!("{}_{:06}.png", prefix, index)
}

/// Write one image as PNG, creating parent directories as needed
pub fn write_png(path: &Path, image: &BgrImage) -> PrepResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    image.to_rgb_image().save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Write `patches` into `dir` as `<prefix>_000000.png`, `<prefix>_000001.png`, ...
///
/// The directory is created if absent. Returns the written paths in input
/// order.
pub fn write_patches(dir: &Path, prefix: &str, patches: &[BgrImage]) -> PrepResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let progress = ProgressTracker::new(patches.len() as u64, &format!("Writing {}", dir.display()));
    let mut written = Vec::with_capacity(patches.len());
    for (i, patch) in patches.iter().enumerate() {
        let path = dir.join(patch_file_name(prefix, i));
        patch.to_rgb_image().save_with_format(&path, ImageFormat::Png)?;
        written.push(path);
        progress.increment(1);
    }
    progress.finish();

    info!("Wrote {} patches to {}", written.len(), dir.display());
    Ok(written)
}
