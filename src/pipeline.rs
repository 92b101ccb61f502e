//! End-to-end dataset preparation
//!
//! IHC patches are split and written first. The two H&E sources are then
//! merged, shuffled, split, and written. Output from earlier stages is left
//! in place if a later stage fails.

use log::info;

use crate::config::PrepConfig;
use crate::dataset::{
    collect_tissue_patches, process_ihc_dataset, process_packed_folds, shuffle_in_place,
    train_test_split, write_split, Domain, FoldOutcome, SplitCounts,
};
use crate::errors::PrepResult;

/// Counts gathered over one preparation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreparationReport {
    /// Patches written to trainA/testA
    pub ihc: SplitCounts,
    /// Patches accepted from the tissue image directory
    pub monuseg_patches: usize,
    /// Patches accepted from the packed-array folds
    pub pannuke_patches: usize,
    /// Per-fold results of the packed-array stage
    pub folds: Vec<FoldOutcome>,
    /// Patches written to trainB/testB
    pub he: SplitCounts,
}

impl PreparationReport {
    /// Folds that were skipped because of an error
    pub fn failed_folds(&self) -> Vec<&FoldOutcome> {
        self.folds.iter().filter(|f| f.result.is_err()).collect()
    }
}

/// Runs every stage in order
pub struct PreparationPipeline<'a> {
    config: &'a PrepConfig,
}

impl<'a> PreparationPipeline<'a> {
    pub fn new(config: &'a PrepConfig) -> Self {
        PreparationPipeline { config }
    }

    pub fn run(&self) -> PrepResult<PreparationReport> {
        self.config.validate()?;
        let mut report = PreparationReport::default();

        info!("Processing DeepLIIF (IHC domain)...");
        report.ihc = process_ihc_dataset(self.config)?;

        info!("Processing MoNuSeg (H&E domain)...");
        let mut he_patches = collect_tissue_patches(self.config)?;
        report.monuseg_patches = he_patches.len();

        info!("Processing PanNuke (H&E domain)...");
        let packed = process_packed_folds(self.config)?;
        report.pannuke_patches = packed.patches.len();
        report.folds = packed.folds;

        he_patches.extend(packed.patches);
        shuffle_in_place(&mut he_patches, self.config.split.shuffle_seed);

        let split = train_test_split(he_patches, self.config.split.test_fraction, self.config.split.seed)?;
        report.he = write_split(&self.config.paths.output, Domain::HematoxylinEosin, &split)?;

        info!("H&E: {} train, {} test patches", report.he.train, report.he.test);
        info!("Dataset preparation completed!");
        Ok(report)
    }
}
