//! Tests for sliding-window extraction

extern crate std;

use crate::config::PatchConfig;
use crate::extractor::{tissue_ratio, PatchExtractor, Region};
use crate::pixels::BgrImage;

fn extractor(patch_size: u32, stride: u32, min_tissue_ratio: f64) -> PatchExtractor {
    PatchExtractor::new(PatchConfig {
        patch_size,
        stride,
        min_tissue_ratio,
        brightness_cutoff: 200,
    })
}

#[test]
fn test_white_image_yields_no_patches() {
    let image = BgrImage::filled(512, 512, [255, 255, 255]);
    let patches = extractor(256, 128, 0.3).extract(&image);
    std::assert!(patches.is_empty());
}

#[test]
fn test_dark_image_yields_full_grid() {
    let image = BgrImage::filled(512, 512, [50, 50, 50]);
    let patches = extractor(256, 128, 0.3).extract(&image);
    std::assert_eq!(patches.len(), 9);
    std::assert!(patches.iter().all(|p| p.dimensions() == (256, 256)));
}

#[test]
fn test_candidate_count_formula() {
    let ex = extractor(256, 128, 0.3);
    std::assert_eq!(ex.candidate_count(512, 512), 9);
    std::assert_eq!(ex.candidate_count(1000, 600), 3 * 6);
    std::assert_eq!(ex.candidate_count(256, 256), 1);
    std::assert_eq!(ex.candidate_count(255, 512), 0);
    std::assert_eq!(ex.candidate_count(512, 100), 0);

    for (w, h) in [(1000u32, 600u32), (300, 900), (256, 257), (384, 383)] {
        std::assert_eq!(ex.window_origins(w, h).len(), ex.candidate_count(w, h));
    }
}

#[test]
fn test_windows_follow_raster_order() {
    let origins = extractor(2, 2, 0.0).window_origins(5, 4);
    let corners: Vec<(u32, u32)> = origins.iter().map(|r| (r.x, r.y)).collect();
    // Trailing column x = 4 cannot hold a full window
    std::assert_eq!(corners, vec![(0, 0), (2, 0), (0, 2), (2, 2)]);
    std::assert!(origins.iter().all(|r| r.fits_within(5, 4)));
}

#[test]
fn test_ratio_equal_to_threshold_is_rejected() {
    let ex = extractor(10, 10, 0.3);

    let mut image = BgrImage::filled(10, 10, [255, 255, 255]);
    for i in 0..30 {
        image.put_pixel(i % 10, i / 10, [0, 0, 0]);
    }
    std::assert_eq!(tissue_ratio(&image, 200, 100), 0.3);
    std::assert!(!ex.accepts(&image));
    std::assert!(ex.extract(&image).is_empty());

    image.put_pixel(0, 3, [0, 0, 0]);
    std::assert!(ex.accepts(&image));
    std::assert_eq!(ex.extract(&image).len(), 1);
}

#[test]
fn test_overlapping_windows_are_kept() {
    let mut image = BgrImage::filled(6, 4, [255, 255, 255]);
    for y in 0..4 {
        for x in 2..4 {
            image.put_pixel(x, y, [10, 10, 10]);
        }
    }
    // Windows at x = 0, 1, 2 all contain dark pixels
    let patches = extractor(4, 1, 0.2).extract(&image);
    std::assert_eq!(patches.len(), 3);
    std::assert_eq!(
        patches[0].crop(&Region::square(2, 0, 2)).unwrap(),
        patches[2].crop(&Region::square(0, 0, 2)).unwrap()
    );
}

#[test]
fn test_tissue_ratio_uses_given_area() {
    let image = BgrImage::filled(4, 4, [0, 0, 0]);
    std::assert_eq!(tissue_ratio(&image, 200, 16), 1.0);
    std::assert_eq!(tissue_ratio(&image, 200, 64), 0.25);
    std::assert_eq!(tissue_ratio(&image, 200, 0), 0.0);
}
