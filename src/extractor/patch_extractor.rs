//! Sliding-window patch extraction with a tissue filter
//!
//! Windows are visited in raster order. Windows that would cross the right
//! or bottom border are never visited, so the border strip narrower than a
//! stride is dropped rather than padded.

use log::debug;

use crate::config::PatchConfig;
use crate::pixels::BgrImage;

use super::region::Region;

/// Fraction of `area` covered by pixels darker than `cutoff`
///
/// `area` is passed separately because packed-array images are scored
/// against the nominal patch area, whatever their actual size.
pub fn tissue_ratio(image: &BgrImage, cutoff: u8, area: usize) -> f64 {
    if area == 0 {
        return 0.0;
    }
    image.count_darker_than(cutoff) as f64 / area as f64
}

/// Extracts fixed-size patches that contain enough tissue
#[derive(Debug, Clone, Copy)]
pub struct PatchExtractor {
    config: PatchConfig,
}

impl PatchExtractor {
    pub fn new(config: PatchConfig) -> Self {
        PatchExtractor { config }
    }

    pub fn config(&self) -> &PatchConfig {
        &self.config
    }

    /// Top-left corners visited for an image of the given size, row-major
    pub fn window_origins(&self, width: u32, height: u32) -> Vec<Region> {
        let size = self.config.patch_size;
        let stride = self.config.stride.max(1) as usize;
        if size == 0 || width < size || height < size {
            return Vec::new();
        }

        let mut regions = Vec::with_capacity(self.candidate_count(width, height));
        for y in (0..=height - size).step_by(stride) {
            for x in (0..=width - size).step_by(stride) {
                regions.push(Region::square(x, y, size));
            }
        }
        regions
    }

    /// Number of windows visited before filtering
    pub fn candidate_count(&self, width: u32, height: u32) -> usize {
        let size = self.config.patch_size;
        let stride = self.config.stride.max(1);
        if size == 0 || width < size || height < size {
            return 0;
        }
        let rows = ((height - size) / stride + 1) as usize;
        let cols = ((width - size) / stride + 1) as usize;
        rows * cols
    }

    /// Whether a patch has strictly more tissue than the threshold
    pub fn accepts(&self, patch: &BgrImage) -> bool {
        let ratio = tissue_ratio(patch, self.config.brightness_cutoff, self.config.patch_area());
        ratio > self.config.min_tissue_ratio
    }

    /// All accepted patches of `image` in raster order
    pub fn extract(&self, image: &BgrImage) -> Vec<BgrImage> {
        let (width, height) = image.dimensions();
        let origins = self.window_origins(width, height);
        let candidates = origins.len();

        let patches: Vec<BgrImage> = origins
            .iter()
            .filter_map(|region| image.crop(region))
            .filter(|patch| self.accepts(patch))
            .collect();

        debug!(
            "Accepted {} of {} windows from {}x{} image",
            patches.len(),
            candidates,
            width,
            height
        );
        patches
    }
}
