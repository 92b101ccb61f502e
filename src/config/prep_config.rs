//! Configuration structures and TOML loading

use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use log::debug;

use crate::errors::{PrepError, PrepResult};

lazy_static! {
    // Parse the embedded defaults once
    static ref DEFAULT_CONFIG: PrepConfig = {
        let content = include_str!("../../histoprep_defaults.toml");
        PrepConfig::blank().overlaid_str(content).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse built-in defaults: {}", e);
            PrepConfig::blank()
        })
    };
}

/// Input and output locations
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetPaths {
    /// DeepLIIF dataset root (IHC domain)
    pub deepliif: PathBuf,
    /// MoNuSeg dataset root (H&E domain)
    pub monuseg: PathBuf,
    /// PanNuke dataset root holding one directory per fold
    pub pannuke: PathBuf,
    /// Output root receiving trainA/testA/trainB/testB
    pub output: PathBuf,
    /// Directory receiving diagnostic previews
    pub debug: PathBuf,
    /// Subdirectory of `deepliif` with the IHC images
    pub ihc_subdir: String,
    /// Subdirectory of `monuseg` with the tissue images
    pub tissue_subdir: String,
    /// Packed array location relative to a fold directory
    pub packed_array: PathBuf,
    /// Packed array checked by the inspection command, relative to `pannuke`
    pub inspect_array: PathBuf,
    /// Accepted file extensions, lowercase without the dot
    pub extensions: Vec<String>,
}

impl DatasetPaths {
    pub fn ihc_dir(&self) -> PathBuf {
        self.deepliif.join(&self.ihc_subdir)
    }

    pub fn tissue_dir(&self) -> PathBuf {
        self.monuseg.join(&self.tissue_subdir)
    }

    pub fn inspect_file(&self) -> PathBuf {
        self.pannuke.join(&self.inspect_array)
    }
}

/// Sliding window and tissue filter parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchConfig {
    /// Side length of the square window in pixels
    pub patch_size: u32,
    /// Step between window origins in pixels
    pub stride: u32,
    /// A patch is kept only when its tissue ratio is strictly above this
    pub min_tissue_ratio: f64,
    /// Gray values strictly below this count as tissue
    pub brightness_cutoff: u8,
}

impl PatchConfig {
    /// Number of pixels in one patch, used as the tissue ratio denominator
    pub fn patch_area(&self) -> usize {
        self.patch_size as usize * self.patch_size as usize
    }
}

/// Train/test partition parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitConfig {
    /// Fraction of samples held out for testing
    pub test_fraction: f64,
    /// Seed for the train/test permutation
    pub seed: u64,
    /// Seed for the H&E pre-split shuffle; `None` shuffles from entropy
    pub shuffle_seed: Option<u64>,
}

/// Complete preparation configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PrepConfig {
    pub paths: DatasetPaths,
    pub patches: PatchConfig,
    pub split: SplitConfig,
}

impl Default for PrepConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}

impl PrepConfig {
    fn blank() -> Self {
        PrepConfig {
            paths: DatasetPaths {
                deepliif: PathBuf::new(),
                monuseg: PathBuf::new(),
                pannuke: PathBuf::new(),
                output: PathBuf::new(),
                debug: PathBuf::new(),
                ihc_subdir: String::new(),
                tissue_subdir: String::new(),
                packed_array: PathBuf::new(),
                inspect_array: PathBuf::new(),
                extensions: Vec::new(),
            },
            patches: PatchConfig {
                patch_size: 0,
                stride: 0,
                min_tissue_ratio: 0.0,
                brightness_cutoff: 0,
            },
            split: SplitConfig {
                test_fraction: 0.0,
                seed: 0,
                shuffle_seed: None,
            },
        }
    }

    /// Parse a TOML document and apply it on top of the defaults
    pub fn from_str(content: &str) -> PrepResult<Self> {
        let config = Self::default().overlaid_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file and apply it on top of the defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> PrepResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PrepError::MissingPath(path.to_path_buf()));
        }
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    fn overlaid_str(mut self, content: &str) -> PrepResult<Self> {
        let table: toml::Table = content
            .parse()
            .map_err(|e| PrepError::InvalidConfig(format!("Failed to parse TOML: {}", e)))?;
        self.overlay(&table)?;
        Ok(self)
    }

    /// Overwrite every field named in `table`, leaving the others untouched
    pub fn overlay(&mut self, table: &toml::Table) -> PrepResult<()> {
        if let Some(paths) = section(table, "paths")? {
            let p = &mut self.paths;
            read_path(paths, "deepliif", &mut p.deepliif)?;
            read_path(paths, "monuseg", &mut p.monuseg)?;
            read_path(paths, "pannuke", &mut p.pannuke)?;
            read_path(paths, "output", &mut p.output)?;
            read_path(paths, "debug", &mut p.debug)?;
            read_string(paths, "ihc_subdir", &mut p.ihc_subdir)?;
            read_string(paths, "tissue_subdir", &mut p.tissue_subdir)?;
            read_path(paths, "packed_array", &mut p.packed_array)?;
            read_path(paths, "inspect_array", &mut p.inspect_array)?;
            if let Some(value) = paths.get("extensions") {
                p.extensions = string_list(value, "paths.extensions")?;
            }
        }

        if let Some(patches) = section(table, "patches")? {
            let p = &mut self.patches;
            if let Some(v) = read_integer(patches, "patch_size", u32::MAX as i64)? {
                p.patch_size = v as u32;
            }
            if let Some(v) = read_integer(patches, "stride", u32::MAX as i64)? {
                p.stride = v as u32;
            }
            if let Some(v) = read_float(patches, "min_tissue_ratio")? {
                p.min_tissue_ratio = v;
            }
            if let Some(v) = read_integer(patches, "brightness_cutoff", u8::MAX as i64)? {
                p.brightness_cutoff = v as u8;
            }
        }

        if let Some(split) = section(table, "split")? {
            let s = &mut self.split;
            if let Some(v) = read_float(split, "test_fraction")? {
                s.test_fraction = v;
            }
            if let Some(v) = read_integer(split, "seed", i64::MAX)? {
                s.seed = v as u64;
            }
            if let Some(v) = read_integer(split, "shuffle_seed", i64::MAX)? {
                s.shuffle_seed = Some(v as u64);
            }
        }

        Ok(())
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> PrepResult<()> {
        if self.patches.patch_size == 0 {
            return Err(PrepError::InvalidConfig("patch_size must be positive".to_string()));
        }
        if self.patches.stride == 0 {
            return Err(PrepError::InvalidConfig("stride must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.patches.min_tissue_ratio) {
            return Err(PrepError::InvalidConfig(format!(
                "min_tissue_ratio must lie in [0, 1], got {}",
                self.patches.min_tissue_ratio
            )));
        }
        if !(self.split.test_fraction > 0.0 && self.split.test_fraction < 1.0) {
            return Err(PrepError::InvalidConfig(format!(
                "test_fraction must lie in (0, 1), got {}",
                self.split.test_fraction
            )));
        }
        if self.paths.extensions.is_empty() {
            return Err(PrepError::InvalidConfig("extension allow-list is empty".to_string()));
        }
        Ok(())
    }
}

fn section<'t>(table: &'t toml::Table, name: &str) -> PrepResult<Option<&'t toml::Table>> {
    match table.get(name) {
        None => Ok(None),
        Some(value) => value
            .as_table()
            .map(Some)
            .ok_or_else(|| PrepError::InvalidConfig(format!("[{}] must be a table", name))),
    }
}

fn read_string(table: &toml::Table, key: &str, target: &mut String) -> PrepResult<()> {
    if let Some(value) = table.get(key) {
        *target = value
            .as_str()
            .ok_or_else(|| PrepError::InvalidConfig(format!("{} must be a string", key)))?
            .to_string();
    }
    Ok(())
}

fn read_path(table: &toml::Table, key: &str, target: &mut PathBuf) -> PrepResult<()> {
    let mut raw = String::new();
    if table.contains_key(key) {
        read_string(table, key, &mut raw)?;
        *target = PathBuf::from(raw);
    }
    Ok(())
}

fn read_integer(table: &toml::Table, key: &str, max: i64) -> PrepResult<Option<i64>> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => {
            let v = value
                .as_integer()
                .ok_or_else(|| PrepError::InvalidConfig(format!("{} must be an integer", key)))?;
            if v < 0 || v > max {
                return Err(PrepError::InvalidConfig(format!(
                    "{} must lie in [0, {}], got {}",
                    key, max, v
                )));
            }
            Ok(Some(v))
        }
    }
}

fn read_float(table: &toml::Table, key: &str) -> PrepResult<Option<f64>> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_float()
            .or_else(|| value.as_integer().map(|i| i as f64))
            .map(Some)
            .ok_or_else(|| PrepError::InvalidConfig(format!("{} must be a number", key))),
    }
}

fn string_list(value: &toml::Value, key: &str) -> PrepResult<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| PrepError::InvalidConfig(format!("{} must be an array", key)))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(|s| s.trim_start_matches('.').to_lowercase())
                .ok_or_else(|| PrepError::InvalidConfig(format!("{} entries must be strings", key)))
        })
        .collect()
}
