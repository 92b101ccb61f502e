//! Dataset drivers
//!
//! One driver per source dataset, plus the shared pieces they are built
//! from: the translation domains, fold discovery, and the train/test split.

mod domain;
mod split;
mod folds;
mod directory_driver;
mod packed_driver;
#[cfg(test)]
mod tests;

pub use domain::Domain;
pub use split::{shuffle_in_place, split_sizes, train_test_split, TrainTestSplit};
pub use folds::{discover_folds, is_fold_name};
pub use directory_driver::{
    collect_directory_patches, collect_tissue_patches, process_ihc_dataset, write_split, SplitCounts,
};
pub use packed_driver::{packed_image_to_bgr, process_packed_folds, FoldOutcome, PackedCollection};
