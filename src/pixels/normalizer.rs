//! Conversion of arbitrary sample types to 8-bit samples
//!
//! Floating point stacks come in two encodings, `[0, 1]` and `[0, 255]`.
//! The image maximum decides which one applies. Conversions truncate,
//! they never round.

use super::raw_image::{RawImage, SampleType, Samples};

/// How raw samples are turned into bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Float samples in `[0, 1]`: multiply by 255, then truncate
    ScaleUnitRange,
    /// Float samples in `[0, 255]`: clip, then truncate
    ClipToByte,
    /// Already `u8`
    PassThrough,
    /// Other integers: keep the low byte
    CastToByte,
}

/// Pick the normalization for an image from its sample type and maximum
pub fn choose_normalization(sample_type: SampleType, max_value: f64) -> Normalization {
    match sample_type {
        SampleType::F32 | SampleType::F64 => {
            if max_value <= 1.0 {
                Normalization::ScaleUnitRange
            } else {
                Normalization::ClipToByte
            }
        }
        SampleType::U8 => Normalization::PassThrough,
        _ => Normalization::CastToByte,
    }
}

/// Normalize one raw image to 8-bit samples in its original channel order
pub fn normalize(raw: RawImage) -> Vec<u8> {
    let max_value = if raw.sample_type.is_float() {
        raw.samples.max_value()
    } else {
        0.0
    };
    let strategy = choose_normalization(raw.sample_type, max_value);
    apply(strategy, raw.samples)
}

fn apply(strategy: Normalization, samples: Samples) -> Vec<u8> {
    match samples {
        Samples::U8(v) => v,
        Samples::Int(v) => v.into_iter().map(|s| s as u8).collect(),
        // f32 stays in single precision for the multiplication
        Samples::F32(v) => match strategy {
            Normalization::ScaleUnitRange => v.into_iter().map(|s| (s * 255.0f32) as u8).collect(),
            Normalization::ClipToByte => v.into_iter().map(|s| s.clamp(0.0, 255.0) as u8).collect(),
            _ => v.into_iter().map(|s| s as u8).collect(),
        },
        Samples::F64(v) => match strategy {
            Normalization::ScaleUnitRange => v.into_iter().map(|s| (s * 255.0) as u8).collect(),
            Normalization::ClipToByte => v.into_iter().map(|s| s.clamp(0.0, 255.0) as u8).collect(),
            _ => v.into_iter().map(|s| s as u8).collect(),
        },
    }
}
