//! Raw image samples with their numeric representation

use std::fmt;

use crate::errors::{PrepError, PrepResult};

/// Numeric representation of the samples in a packed array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleType {
    Bool,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
}

impl SampleType {
    /// Map an NPY type character and item size (`'f'`, 8) to a sample type
    pub fn from_kind(kind: char, size: usize) -> Option<Self> {
        match (kind, size) {
            ('b', 1) => Some(SampleType::Bool),
            ('u', 1) => Some(SampleType::U8),
            ('i', 1) => Some(SampleType::I8),
            ('u', 2) => Some(SampleType::U16),
            ('i', 2) => Some(SampleType::I16),
            ('u', 4) => Some(SampleType::U32),
            ('i', 4) => Some(SampleType::I32),
            ('u', 8) => Some(SampleType::U64),
            ('i', 8) => Some(SampleType::I64),
            ('f', 4) => Some(SampleType::F32),
            ('f', 8) => Some(SampleType::F64),
            _ => None,
        }
    }

    /// Size of one sample in bytes
    pub fn item_size(&self) -> usize {
        match self {
            SampleType::Bool | SampleType::U8 | SampleType::I8 => 1,
            SampleType::U16 | SampleType::I16 => 2,
            SampleType::U32 | SampleType::I32 | SampleType::F32 => 4,
            SampleType::U64 | SampleType::I64 | SampleType::F64 => 8,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, SampleType::F32 | SampleType::F64)
    }

    /// NumPy-style name, as printed in log lines
    pub fn name(&self) -> &'static str {
        match self {
            SampleType::Bool => "bool",
            SampleType::U8 => "uint8",
            SampleType::I8 => "int8",
            SampleType::U16 => "uint16",
            SampleType::I16 => "int16",
            SampleType::U32 => "uint32",
            SampleType::I32 => "int32",
            SampleType::U64 => "uint64",
            SampleType::I64 => "int64",
            SampleType::F32 => "float32",
            SampleType::F64 => "float64",
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Sample storage
///
/// Integer types other than `u8` are widened to `i64`; widening keeps the
/// low byte, which is all the byte cast looks at.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    U8(Vec<u8>),
    Int(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl Samples {
    pub fn len(&self) -> usize {
        match self {
            Samples::U8(v) => v.len(),
            Samples::Int(v) => v.len(),
            Samples::F32(v) => v.len(),
            Samples::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest sample as `f64`; NaN if any float sample is NaN
    pub fn max_value(&self) -> f64 {
        match self {
            Samples::U8(v) => v.iter().copied().max().map_or(f64::NEG_INFINITY, f64::from),
            Samples::Int(v) => v.iter().copied().max().map_or(f64::NEG_INFINITY, |m| m as f64),
            Samples::F32(v) => nan_propagating_max(v.iter().map(|&s| s as f64)),
            Samples::F64(v) => nan_propagating_max(v.iter().copied()),
        }
    }

    /// Smallest sample as `f64`; NaN if any float sample is NaN
    pub fn min_value(&self) -> f64 {
        match self {
            Samples::U8(v) => v.iter().copied().min().map_or(f64::INFINITY, f64::from),
            Samples::Int(v) => v.iter().copied().min().map_or(f64::INFINITY, |m| m as f64),
            Samples::F32(v) => -nan_propagating_max(v.iter().map(|&s| -(s as f64))),
            Samples::F64(v) => -nan_propagating_max(v.iter().map(|&s| -s)),
        }
    }
}

fn nan_propagating_max(values: impl Iterator<Item = f64>) -> f64 {
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if v.is_nan() {
            return f64::NAN;
        }
        if v > max {
            max = v;
        }
    }
    max
}

/// One image of a packed array, height × width × channel in row-major order
#[derive(Debug, Clone, PartialEq)]
pub struct RawImage {
    pub height: usize,
    pub width: usize,
    pub channels: usize,
    pub sample_type: SampleType,
    pub samples: Samples,
}

impl RawImage {
    /// Create a raw image, checking the sample count against the dimensions
    pub fn new(
        height: usize,
        width: usize,
        channels: usize,
        sample_type: SampleType,
        samples: Samples,
    ) -> PrepResult<Self> {
        if height == 0 || width == 0 {
            return Err(PrepError::MalformedArray(format!(
                "image dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if channels != 3 {
            return Err(PrepError::MalformedArray(format!(
                "expected 3 channels, got {}",
                channels
            )));
        }
        let expected = height
            .checked_mul(width)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| {
                PrepError::MalformedArray(format!(
                    "shape overflows: {}x{}x{}",
                    height, width, channels
                ))
            })?;
        if samples.len() != expected {
            return Err(PrepError::MalformedArray(format!(
                "expected {} samples for {}x{}x{}, got {}",
                expected,
                height,
                width,
                channels,
                samples.len()
            )));
        }

        Ok(RawImage {
            height,
            width,
            channels,
            sample_type,
            samples,
        })
    }
}
