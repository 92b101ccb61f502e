//! 8-bit BGR image buffer
//!
//! Patches are kept in blue-green-red order from load to write. The `image`
//! crate only knows RGB, so conversions happen at the loader and writer
//! boundaries.

use image::{GrayImage, Luma, RgbImage};

use crate::errors::{PrepError, PrepResult};
use crate::extractor::Region;

// Fixed-point luma weights with 14 fractional bits (0.114, 0.587, 0.299)
const B_WEIGHT: u32 = 1868;
const G_WEIGHT: u32 = 9617;
const R_WEIGHT: u32 = 4899;
const LUMA_SHIFT: u32 = 14;
const LUMA_ROUND: u32 = 1 << (LUMA_SHIFT - 1);

/// Gray value of one BGR pixel
pub fn bgr_to_gray(b: u8, g: u8, r: u8) -> u8 {
    let y = B_WEIGHT * b as u32 + G_WEIGHT * g as u32 + R_WEIGHT * r as u32 + LUMA_ROUND;
    (y >> LUMA_SHIFT) as u8
}

/// Interleaved 3-channel image in BGR order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BgrImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl BgrImage {
    /// Wrap an interleaved BGR buffer
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> PrepResult<Self> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(PrepError::MalformedArray(format!(
                "BGR buffer for {}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(BgrImage { width, height, data })
    }

    /// Image with every pixel set to `bgr`
    pub fn filled(width: u32, height: u32, bgr: [u8; 3]) -> Self {
        let pixels = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixels * 3);
        for _ in 0..pixels {
            data.extend_from_slice(&bgr);
        }
        BgrImage { width, height, data }
    }

    /// Reorder an interleaved RGB buffer into BGR
    pub fn from_rgb_samples(width: u32, height: u32, mut samples: Vec<u8>) -> PrepResult<Self> {
        for pixel in samples.chunks_exact_mut(3) {
            pixel.swap(0, 2);
        }
        Self::new(width, height, samples)
    }

    pub fn from_rgb_image(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let mut data = image.into_raw();
        for pixel in data.chunks_exact_mut(3) {
            pixel.swap(0, 2);
        }
        BgrImage { width, height, data }
    }

    /// Copy to an RGB image for encoding
    pub fn to_rgb_image(&self) -> RgbImage {
        let mut data = self.data.clone();
        for pixel in data.chunks_exact_mut(3) {
            pixel.swap(0, 2);
        }
        // Buffer length is checked at construction
        RgbImage::from_raw(self.width, self.height, data)
            .unwrap_or_else(|| RgbImage::new(self.width, self.height))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// BGR triple at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, bgr: [u8; 3]) {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        self.data[idx..idx + 3].copy_from_slice(&bgr);
    }

    /// Copy out a region, or `None` if it reaches past the image border
    pub fn crop(&self, region: &Region) -> Option<BgrImage> {
        if !region.fits_within(self.width, self.height) {
            return None;
        }
        let row_bytes = region.width as usize * 3;
        let mut data = Vec::with_capacity(row_bytes * region.height as usize);
        for y in region.y..region.end_y() {
            let start = (y as usize * self.width as usize + region.x as usize) * 3;
            data.extend_from_slice(&self.data[start..start + row_bytes]);
        }
        Some(BgrImage {
            width: region.width,
            height: region.height,
            data,
        })
    }

    pub fn to_gray(&self) -> GrayImage {
        let mut gray = GrayImage::new(self.width, self.height);
        for (out, px) in gray.pixels_mut().zip(self.data.chunks_exact(3)) {
            *out = Luma([bgr_to_gray(px[0], px[1], px[2])]);
        }
        gray
    }

    /// Number of pixels whose gray value is strictly below `cutoff`
    pub fn count_darker_than(&self, cutoff: u8) -> usize {
        self.to_gray().pixels().filter(|px| px[0] < cutoff).count()
    }
}
