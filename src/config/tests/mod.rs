//! Tests for configuration loading

extern crate std;

use std::path::PathBuf;

use crate::config::PrepConfig;
use crate::errors::PrepError;

#[test]
fn test_defaults_match_original_constants() {
    let config = PrepConfig::default();
    std::assert_eq!(config.patches.patch_size, 256);
    std::assert_eq!(config.patches.stride, 128);
    std::assert_eq!(config.patches.min_tissue_ratio, 0.3);
    std::assert_eq!(config.patches.brightness_cutoff, 200);
    std::assert_eq!(config.split.test_fraction, 0.2);
    std::assert_eq!(config.split.seed, 42);
    std::assert!(config.split.shuffle_seed.is_none());
    std::assert_eq!(config.paths.output, PathBuf::from("datasets/histology_stain"));
    std::assert_eq!(config.paths.ihc_dir(), PathBuf::from("data/DeepLIIF/DeepLIIF_Training_Set"));
    std::assert_eq!(config.paths.tissue_dir(), PathBuf::from("data/MoNuSeg/Tissue Images"));
    std::assert_eq!(config.paths.extensions, vec!["png", "tif", "jpg"]);
    std::assert!(config.validate().is_ok());
}

#[test]
fn test_partial_override_keeps_other_defaults() {
    let config = PrepConfig::from_str(
        r#"
        [patches]
        stride = 64

        [split]
        shuffle_seed = 7
        "#,
    )
    .unwrap();

    std::assert_eq!(config.patches.stride, 64);
    std::assert_eq!(config.patches.patch_size, 256);
    std::assert_eq!(config.split.shuffle_seed, Some(7));
    std::assert_eq!(config.split.seed, 42);
}

#[test]
fn test_extensions_are_normalized() {
    let config = PrepConfig::from_str(
        r#"
        [paths]
        extensions = [".PNG", "tiff"]
        "#,
    )
    .unwrap();
    std::assert_eq!(config.paths.extensions, vec!["png", "tiff"]);
}

#[test]
fn test_integer_accepted_for_float_field() {
    let config = PrepConfig::from_str("[patches]\nmin_tissue_ratio = 0\n").unwrap();
    std::assert_eq!(config.patches.min_tissue_ratio, 0.0);
}

#[test]
fn test_invalid_values_rejected() {
    let zero_stride = PrepConfig::from_str("[patches]\nstride = 0\n");
    std::assert!(matches!(zero_stride, Err(PrepError::InvalidConfig(_))));

    let bad_fraction = PrepConfig::from_str("[split]\ntest_fraction = 1.0\n");
    std::assert!(matches!(bad_fraction, Err(PrepError::InvalidConfig(_))));

    let cutoff_too_large = PrepConfig::from_str("[patches]\nbrightness_cutoff = 300\n");
    std::assert!(matches!(cutoff_too_large, Err(PrepError::InvalidConfig(_))));

    let wrong_type = PrepConfig::from_str("[paths]\noutput = 5\n");
    std::assert!(matches!(wrong_type, Err(PrepError::InvalidConfig(_))));

    let not_toml = PrepConfig::from_str("this is = = not toml");
    std::assert!(matches!(not_toml, Err(PrepError::InvalidConfig(_))));
}

#[test]
fn test_missing_config_file() {
    let result = PrepConfig::from_file("definitely/not/here.toml");
    std::assert!(matches!(result, Err(PrepError::MissingPath(_))));
}
