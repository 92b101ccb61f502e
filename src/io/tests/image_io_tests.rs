//! Tests for single-file loading, listing, and patch writing

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};
use tempfile::tempdir;

use crate::errors::PrepError;
use crate::io::{has_allowed_extension, list_image_files, load_bgr_image, patch_file_name, write_patches};
use crate::pixels::BgrImage;

fn default_extensions() -> Vec<String> {
    vec!["png".to_string(), "tif".to_string(), "jpg".to_string()]
}

#[test]
fn test_extension_filter_is_case_insensitive() {
    let exts = default_extensions();
    std::assert!(has_allowed_extension(Path::new("a/slide.PNG"), &exts));
    std::assert!(has_allowed_extension(Path::new("slide.Tif"), &exts));
    std::assert!(has_allowed_extension(Path::new("slide.jpg"), &exts));
    std::assert!(!has_allowed_extension(Path::new("slide.tiff"), &exts));
    std::assert!(!has_allowed_extension(Path::new("slide.jpeg"), &exts));
    std::assert!(!has_allowed_extension(Path::new("notes.txt"), &exts));
    std::assert!(!has_allowed_extension(Path::new("png"), &exts));
}

#[test]
fn test_list_image_files_is_sorted_and_flat() {
    let dir = tempdir().unwrap();
    for name in ["b.png", "a.TIF", "c.txt", "d.jpg"] {
        fs::write(dir.path().join(name), b"x").unwrap();
    }
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("e.png"), b"x").unwrap();

    let files = list_image_files(dir.path(), &default_extensions()).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    std::assert_eq!(names, vec!["a.TIF", "b.png", "d.jpg"]);
}

#[test]
fn test_list_missing_directory() {
    let result = list_image_files(Path::new("missing/dir"), &default_extensions());
    std::assert!(matches!(result, Err(PrepError::MissingPath(_))));
}

#[test]
fn test_load_returns_bgr_and_skips_failures() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tile.png");
    let mut rgb = RgbImage::new(3, 2);
    rgb.put_pixel(1, 1, Rgb([250, 10, 20]));
    rgb.save(&path).unwrap();

    let image = load_bgr_image(&path).unwrap();
    std::assert_eq!(image.dimensions(), (3, 2));
    std::assert_eq!(image.pixel(1, 1), [20, 10, 250]);

    let broken = dir.path().join("broken.png");
    fs::write(&broken, b"not a png").unwrap();
    std::assert!(load_bgr_image(&broken).is_none());
    std::assert!(load_bgr_image(&dir.path().join("absent.png")).is_none());
}

#[test]
fn test_patch_file_names_are_zero_padded() {
    std::assert_eq!(patch_file_name("ihc", 0), "ihc_000000.png");
    std::assert_eq!(patch_file_name("he", 11), "he_000011.png");
    std::assert_eq!(patch_file_name("he", 1234567), "he_1234567.png");
}

#[test]
fn test_write_patches_sequential_without_gaps() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("trainA");
    let patches: Vec<BgrImage> = (0..12u8)
        .map(|i| BgrImage::filled(4, 4, [i, 100, 200]))
        .collect();

    let written = write_patches(&out, "ihc", &patches).unwrap();
    std::assert_eq!(written.len(), 12);
    std::assert_eq!(written[0], out.join("ihc_000000.png"));
    std::assert_eq!(written[11], out.join("ihc_000011.png"));

    let mut names: Vec<String> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    let expected: Vec<String> = (0..12).map(|i| format!("ihc_{:06}.png", i)).collect();
    std::assert_eq!(names, expected);

    // Order and channel layout survive the round trip through PNG
    for (i, path) in written.iter().enumerate() {
        let reloaded = load_bgr_image(path).unwrap();
        std::assert_eq!(reloaded, patches[i]);
    }
}

#[test]
fn test_load_detects_format_from_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mislabeled.tif");
    RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]))
        .save_with_format(&path, image::ImageFormat::Png)
        .unwrap();

    let image = load_bgr_image(&path).unwrap();
    std::assert_eq!(image.dimensions(), (3, 2));
    std::assert_eq!(image.pixel(2, 1), [30, 20, 10]);
}
