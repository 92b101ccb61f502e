//! Packed-array loading diagnostic
//!
//! Opens one fold's array, reports its layout and value range, and writes
//! the first few elements as PNG so the normalization can be eyeballed.

use std::path::{Path, PathBuf};

use log::info;

use crate::errors::PrepResult;
use crate::io::{write_png, PackedArray};
use crate::pixels::SampleType;

use crate::dataset::packed_image_to_bgr;

/// What the diagnostic found in a packed array
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionSummary {
    pub path: PathBuf,
    pub shape: String,
    pub sample_type: SampleType,
    pub min_value: f64,
    pub max_value: f64,
    /// Preview images written, in element order
    pub previews: Vec<PathBuf>,
}

/// Scan `path`, writing the first `preview_count` elements to `preview_dir`
pub fn inspect_packed_array(path: &Path, preview_dir: &Path, preview_count: usize) -> PrepResult<InspectionSummary> {
    let packed = PackedArray::open(path)?;
    let shape = packed.header().shape_string();
    let sample_type = packed.sample_type();
    info!("Successfully loaded: {}", shape);
    info!("Data type: {}", sample_type);

    let mut min_value = f64::INFINITY;
    let mut max_value = f64::NEG_INFINITY;
    let mut previews = Vec::new();

    for (i, raw) in packed.enumerate() {
        let raw = raw?;
        min_value = nan_min(min_value, raw.samples.min_value());
        max_value = nan_max(max_value, raw.samples.max_value());

        if i < preview_count {
            let (h, w, c) = (raw.height, raw.width, raw.channels);
            let image = packed_image_to_bgr(raw)?;
            let bytes = image.as_raw();
            let lo = bytes.iter().copied().min().unwrap_or(0);
            let hi = bytes.iter().copied().max().unwrap_or(0);
            info!(
                "Sample {} - Shape: ({}, {}, {}), dtype: uint8, range: [{}, {}]",
                i, h, w, c, lo, hi
            );

            let preview = preview_dir.join(format!("test_pannuke_{}.png", i));
            write_png(&preview, &image)?;
            previews.push(preview);
        }
    }

    info!("Value range: [{}, {}]", min_value, max_value);
    info!("Test samples saved");

    Ok(InspectionSummary {
        path: path.to_path_buf(),
        shape,
        sample_type,
        min_value,
        max_value,
        previews,
    })
}

fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}
