//! Tests for the BGR image buffer

use image::{Rgb, RgbImage};

use crate::extractor::Region;
use crate::pixels::{bgr_to_gray, BgrImage};

#[test]
fn test_gray_of_neutral_pixels_is_identity() {
    for v in [0u8, 1, 50, 128, 199, 200, 254, 255] {
        std::assert_eq!(bgr_to_gray(v, v, v), v);
    }
}

#[test]
fn test_gray_weights_favor_green() {
    // Pure channels: 0.114 * 255, 0.587 * 255, 0.299 * 255
    std::assert_eq!(bgr_to_gray(255, 0, 0), 29);
    std::assert_eq!(bgr_to_gray(0, 255, 0), 150);
    std::assert_eq!(bgr_to_gray(0, 0, 255), 76);
}

#[test]
fn test_rgb_round_trip_swaps_channels() {
    let mut rgb = RgbImage::new(2, 1);
    rgb.put_pixel(0, 0, Rgb([10, 20, 30]));
    rgb.put_pixel(1, 0, Rgb([200, 100, 0]));

    let bgr = BgrImage::from_rgb_image(rgb.clone());
    std::assert_eq!(bgr.pixel(0, 0), [30, 20, 10]);
    std::assert_eq!(bgr.pixel(1, 0), [0, 100, 200]);
    std::assert_eq!(bgr.to_rgb_image(), rgb);
}

#[test]
fn test_from_rgb_samples_checks_length() {
    let bgr = BgrImage::from_rgb_samples(1, 1, vec![1, 2, 3]).unwrap();
    std::assert_eq!(bgr.as_raw(), &[3, 2, 1]);
    std::assert!(BgrImage::from_rgb_samples(2, 1, vec![1, 2, 3]).is_err());
}

#[test]
fn test_crop_copies_region() {
    let mut image = BgrImage::filled(4, 3, [0, 0, 0]);
    image.put_pixel(2, 1, [9, 8, 7]);
    image.put_pixel(3, 2, [1, 2, 3]);

    let crop = image.crop(&Region::new(2, 1, 2, 2)).unwrap();
    std::assert_eq!(crop.dimensions(), (2, 2));
    std::assert_eq!(crop.pixel(0, 0), [9, 8, 7]);
    std::assert_eq!(crop.pixel(1, 1), [1, 2, 3]);
    std::assert_eq!(crop.pixel(1, 0), [0, 0, 0]);
}

#[test]
fn test_crop_outside_image_is_none() {
    let image = BgrImage::filled(4, 3, [0, 0, 0]);
    std::assert!(image.crop(&Region::new(3, 0, 2, 2)).is_none());
    std::assert!(image.crop(&Region::new(0, 2, 1, 2)).is_none());
    std::assert!(image.crop(&Region::new(0, 0, 4, 3)).is_some());
}

#[test]
fn test_count_darker_than_is_strict() {
    let mut image = BgrImage::filled(2, 2, [200, 200, 200]);
    image.put_pixel(0, 0, [199, 199, 199]);
    std::assert_eq!(image.count_darker_than(200), 1);
    std::assert_eq!(image.to_gray().get_pixel(1, 1)[0], 200);
}
