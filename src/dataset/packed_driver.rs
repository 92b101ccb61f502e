//! Driver for the PanNuke folds
//!
//! Each fold is a packed array of ready-made 256×256 patches. Patches are
//! normalized to bytes, flipped to BGR and filtered on tissue content. A
//! fold that fails for any reason is logged and skipped as a whole.

use std::path::Path;

use log::{error, info, warn};

use crate::config::PrepConfig;
use crate::errors::{PrepError, PrepResult};
use crate::extractor::tissue_ratio;
use crate::io::npy_reader::packed_array_path;
use crate::io::{write_png, PackedArray};
use crate::pixels::{normalize, BgrImage, RawImage};
use crate::utils::progress::ProgressTracker;

const PREVIEW_COUNT: usize = 3;

/// Result of processing one fold
#[derive(Debug, Clone, PartialEq)]
pub struct FoldOutcome {
    pub name: String,
    /// Accepted patch count, or the error message
    pub result: Result<usize, String>,
}

/// Accepted patches of every fold that could be processed
#[derive(Debug, Clone, Default)]
pub struct PackedCollection {
    pub patches: Vec<BgrImage>,
    pub folds: Vec<FoldOutcome>,
}

/// Normalize one packed element and reorder it from RGB to BGR
pub fn packed_image_to_bgr(raw: RawImage) -> PrepResult<BgrImage> {
    let (width, height) = (raw.width, raw.height);
    if width > u32::MAX as usize || height > u32::MAX as usize {
        return Err(PrepError::MalformedArray(format!("image too large: {}x{}", width, height)));
    }
    BgrImage::from_rgb_samples(width as u32, height as u32, normalize(raw))
}

/// Process every fold under the PanNuke root
///
/// Fails only if the root itself cannot be listed.
pub fn process_packed_folds(config: &PrepConfig) -> PrepResult<PackedCollection> {
    info!("Processing PanNuke dataset...");
    let root = &config.paths.pannuke;
    let folds = super::folds::discover_folds(root)?;
    info!("Found folds: {:?}", folds);

    let mut collection = PackedCollection::default();
    for (index, fold) in folds.iter().enumerate() {
        info!("Processing {}...", fold);
        let path = packed_array_path(root, fold, &config.paths.packed_array);
        let preview_dir = if index == 0 { Some(config.paths.debug.as_path()) } else { None };

        match process_fold(&path, fold, config, preview_dir) {
            Ok(patches) => {
                info!("Extracted {} good patches from {}", patches.len(), fold);
                collection.folds.push(FoldOutcome {
                    name: fold.clone(),
                    result: Ok(patches.len()),
                });
                collection.patches.extend(patches);
            }
            Err(e) => {
                error!("Error processing {}: {}", fold, e);
                collection.folds.push(FoldOutcome {
                    name: fold.clone(),
                    result: Err(e.to_string()),
                });
            }
        }
    }

    if folds.is_empty() {
        warn!("No fold directories found under {}", root.display());
    }
    info!("Total PanNuke patches: {}", collection.patches.len());
    Ok(collection)
}

fn process_fold(
    path: &Path,
    fold: &str,
    config: &PrepConfig,
    preview_dir: Option<&Path>,
) -> PrepResult<Vec<BgrImage>> {
    let packed = PackedArray::open(path)?;
    info!("Loaded {} images from {}", packed.len(), fold);
    info!(
        "Image dtype: {}, shape: {}",
        packed.sample_type(),
        packed.header().shape_string()
    );

    let cutoff = config.patches.brightness_cutoff;
    let area = config.patches.patch_area();
    let progress = ProgressTracker::new(packed.len() as u64, fold);

    let mut accepted = Vec::new();
    for (i, raw) in packed.enumerate() {
        let image = packed_image_to_bgr(raw?)?;

        if let Some(dir) = preview_dir.filter(|_| i < PREVIEW_COUNT) {
            let preview = dir.join(format!("debug_pannuke_{}_{}.png", fold, i));
            if let Err(e) = write_png(&preview, &image) {
                warn!("Could not write preview {}: {}", preview.display(), e);
            }
        }

        if tissue_ratio(&image, cutoff, area) > config.patches.min_tissue_ratio {
            accepted.push(image);
            progress.set_message(&format!("{}: {} accepted", fold, accepted.len()));
        }
        progress.increment(1);
    }
    progress.finish();

    Ok(accepted)
}
