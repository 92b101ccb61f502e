//! Drivers for datasets distributed as plain image directories
//!
//! DeepLIIF (IHC) and MoNuSeg (H&E) both ship a flat folder of slides.
//! Every readable slide is cut into patches; unreadable files are skipped.

use std::path::Path;

use log::{debug, info};

use crate::config::PrepConfig;
use crate::errors::PrepResult;
use crate::extractor::PatchExtractor;
use crate::io::{list_image_files, load_bgr_image, write_patches};
use crate::pixels::BgrImage;
use crate::utils::progress::ProgressTracker;

use super::domain::Domain;
use super::split::{train_test_split, TrainTestSplit};

/// Number of patches written per subset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitCounts {
    pub train: usize,
    pub test: usize,
}

/// Patches of every allowed image directly inside `dir`, in file name order
pub fn collect_directory_patches(
    dir: &Path,
    extensions: &[String],
    extractor: &PatchExtractor,
) -> PrepResult<Vec<BgrImage>> {
    let files = list_image_files(dir, extensions)?;
    let progress = ProgressTracker::new(files.len() as u64, &format!("Scanning {}", dir.display()));

    let mut patches = Vec::new();
    for path in &files {
        if let Some(image) = load_bgr_image(path) {
            let found = extractor.extract(&image);
            debug!("{}: {} patches", path.display(), found.len());
            patches.extend(found);
        }
        progress.increment(1);
    }
    progress.finish();

    Ok(patches)
}

/// Write both subsets of a split under `output`
pub fn write_split(output: &Path, domain: Domain, split: &TrainTestSplit<BgrImage>) -> PrepResult<SplitCounts> {
    let train = write_patches(&output.join(domain.train_dir()), domain.prefix(), &split.train)?;
    let test = write_patches(&output.join(domain.test_dir()), domain.prefix(), &split.test)?;
    Ok(SplitCounts {
        train: train.len(),
        test: test.len(),
    })
}

/// Extract, split, and write the DeepLIIF IHC patches
pub fn process_ihc_dataset(config: &PrepConfig) -> PrepResult<SplitCounts> {
    let extractor = PatchExtractor::new(config.patches);
    let patches = collect_directory_patches(&config.paths.ihc_dir(), &config.paths.extensions, &extractor)?;

    let split = train_test_split(patches, config.split.test_fraction, config.split.seed)?;
    let counts = write_split(&config.paths.output, Domain::Ihc, &split)?;

    info!("DeepLIIF: {} train, {} test patches", counts.train, counts.test);
    Ok(counts)
}

/// Extract the MoNuSeg H&E patches without splitting them
pub fn collect_tissue_patches(config: &PrepConfig) -> PrepResult<Vec<BgrImage>> {
    let extractor = PatchExtractor::new(config.patches);
    let patches = collect_directory_patches(&config.paths.tissue_dir(), &config.paths.extensions, &extractor)?;
    info!("MoNuSeg: {} patches", patches.len());
    Ok(patches)
}
