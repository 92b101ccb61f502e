//! Discovery of packed-array fold directories

use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::errors::{PrepError, PrepResult};

lazy_static! {
    static ref FOLD_NAME: Regex = Regex::new(r"(?i)fold").expect("valid fold pattern");
}

/// Whether a directory name looks like a fold ("Fold 1", "fold2", ...)
pub fn is_fold_name(name: &str) -> bool {
    FOLD_NAME.is_match(name)
}

/// Sorted names of the fold directories under `root`
///
/// A fold is a directory whose name contains "fold" in any case and which
/// has an `images` subdirectory.
pub fn discover_folds(root: &Path) -> PrepResult<Vec<String>> {
    if !root.is_dir() {
        return Err(PrepError::MissingPath(root.to_path_buf()));
    }

    let mut folds = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_fold_name(&name) && entry.path().join("images").is_dir() {
            folds.push(name);
        } else {
            debug!("Ignoring {} while looking for folds", name);
        }
    }
    folds.sort();
    Ok(folds)
}
