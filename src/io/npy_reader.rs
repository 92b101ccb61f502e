//! Reader for NumPy `.npy` stacks of images
//!
//! A packed array holds N images of shape [H, W, 3] in one C-ordered
//! tensor. The header is parsed up front; images are decoded one at a time
//! while iterating so a whole fold never has to sit in memory as floats.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::errors::{PrepError, PrepResult};
use crate::pixels::{RawImage, SampleType, Samples};

const NPY_MAGIC: &[u8; 6] = b"\x93NUMPY";

lazy_static! {
    static ref DESCR_RE: Regex =
        Regex::new(r"'descr'\s*:\s*'([<>|=])([a-zA-Z])(\d+)'").expect("valid descr pattern");
    static ref FORTRAN_RE: Regex =
        Regex::new(r"'fortran_order'\s*:\s*(True|False)").expect("valid fortran pattern");
    static ref SHAPE_RE: Regex =
        Regex::new(r"'shape'\s*:\s*\(([^)]*)\)").expect("valid shape pattern");
}

/// Byte order of the samples in an NPY payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    /// Interpret the byte order character of a dtype descriptor
    pub fn from_marker(marker: char) -> Self {
        match marker {
            '>' => Endianness::Big,
            '<' => Endianness::Little,
            // '|' (not applicable) and '=' (native)
            _ => {
                if cfg!(target_endian = "big") {
                    Endianness::Big
                } else {
                    Endianness::Little
                }
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Endianness::Little => "little-endian",
            Endianness::Big => "big-endian",
        }
    }
}

/// Parsed NPY header
#[derive(Debug, Clone, PartialEq)]
pub struct NpyHeader {
    pub major_version: u8,
    pub minor_version: u8,
    pub sample_type: SampleType,
    pub endianness: Endianness,
    pub fortran_order: bool,
    pub shape: Vec<usize>,
    /// Offset of the first payload byte from the start of the file
    pub data_offset: u64,
}

impl NpyHeader {
    /// Read the magic string, version, and header dictionary
    pub fn read_from<R: Read>(reader: &mut R) -> PrepResult<Self> {
        let mut magic = [0u8; 6];
        reader.read_exact(&mut magic)?;
        if &magic != NPY_MAGIC {
            return Err(PrepError::InvalidNpyHeader("missing \\x93NUMPY magic".to_string()));
        }

        let major_version = reader.read_u8()?;
        let minor_version = reader.read_u8()?;
        let (header_len, prefix_len) = match major_version {
            1 => (reader.read_u16::<LittleEndian>()? as usize, 10u64),
            2 | 3 => (reader.read_u32::<LittleEndian>()? as usize, 12u64),
            v => {
                return Err(PrepError::InvalidNpyHeader(format!(
                    "unsupported format version {}.{}",
                    v, minor_version
                )))
            }
        };

        let mut raw = vec![0u8; header_len];
        reader.read_exact(&mut raw)?;
        let text = String::from_utf8_lossy(&raw);

        let mut header = Self::parse_dict(&text)?;
        header.major_version = major_version;
        header.minor_version = minor_version;
        header.data_offset = prefix_len + header_len as u64;
        Ok(header)
    }

    /// Parse the Python dict literal describing dtype, order, and shape
    pub fn parse_dict(text: &str) -> PrepResult<Self> {
        let descr = DESCR_RE
            .captures(text)
            .ok_or_else(|| PrepError::InvalidNpyHeader(format!("no 'descr' in {}", text.trim())))?;
        let marker = descr[1].chars().next().unwrap_or('|');
        let kind = descr[2].chars().next().unwrap_or('?');
        let size: usize = descr[3]
            .parse()
            .map_err(|_| PrepError::InvalidNpyHeader(format!("bad item size '{}'", &descr[3])))?;
        let sample_type = SampleType::from_kind(kind, size)
            .ok_or_else(|| {
                PrepError::UnsupportedDtype(format!("{}{}{}", &descr[1], &descr[2], &descr[3]))
            })?;

        let fortran_order = FORTRAN_RE
            .captures(text)
            .map(|c| &c[1] == "True")
            .ok_or_else(|| PrepError::InvalidNpyHeader("no 'fortran_order'".to_string()))?;

        let shape_caps = SHAPE_RE
            .captures(text)
            .ok_or_else(|| PrepError::InvalidNpyHeader("no 'shape'".to_string()))?;
        let shape = shape_caps[1]
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.trim_end_matches('L')
                    .parse::<usize>()
                    .map_err(|_| PrepError::InvalidNpyHeader(format!("bad shape entry '{}'", s)))
            })
            .collect::<PrepResult<Vec<usize>>>()?;

        Ok(NpyHeader {
            major_version: 1,
            minor_version: 0,
            sample_type,
            endianness: Endianness::from_marker(marker),
            fortran_order,
            shape,
            data_offset: 0,
        })
    }

    /// Total payload size in bytes
    ///
    /// Fails with `MalformedArray` when the declared shape does not fit in
    /// a 64-bit byte count.
    pub fn payload_len(&self) -> PrepResult<u64> {
        self.shape
            .iter()
            .try_fold(self.sample_type.item_size() as u64, |acc, &dim| acc.checked_mul(dim as u64))
            .ok_or_else(|| self.overflow_error())
    }

    /// Size of one element ([H, W, C] slice) in bytes
    pub fn element_len(&self) -> PrepResult<usize> {
        self.shape
            .iter()
            .skip(1)
            .try_fold(self.sample_type.item_size(), |acc, &dim| acc.checked_mul(dim))
            .ok_or_else(|| self.overflow_error())
    }

    fn overflow_error(&self) -> PrepError {
        PrepError::MalformedArray(format!("shape overflows: {}", self.shape_string()))
    }

    /// Shape formatted like NumPy prints it
    pub fn shape_string(&self) -> String {
        let parts: Vec<String> = self.shape.iter().map(|d| d.to_string()).collect();
        if parts.len() == 1 {
            format!("({},)", parts[0])
        } else {
            format!("({})", parts.join(", "))
        }
    }
}

/// A stack of images backed by an NPY stream
///
/// Iterating yields one [`RawImage`] per element. A read error ends the
/// iteration after being returned once.
pub struct PackedArray<R: Read> {
    header: NpyHeader,
    reader: R,
    height: usize,
    width: usize,
    channels: usize,
    /// Bytes per element
    element_len: usize,
    next_index: usize,
}

impl PackedArray<BufReader<File>> {
    /// Open a packed array file
    ///
    /// Fails if the file does not exist, the header is invalid, the array is
    /// not [N, H, W, 3], or the file is shorter than the header declares.
    pub fn open<P: AsRef<Path>>(path: P) -> PrepResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PrepError::MissingPath(path.to_path_buf()));
        }
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();
        let packed = Self::from_reader(BufReader::with_capacity(1024 * 1024, file), Some(file_len))?;
        debug!(
            "Opened {} with shape {} ({}, {})",
            path.display(),
            packed.header.shape_string(),
            packed.header.sample_type,
            packed.header.endianness.name()
        );
        Ok(packed)
    }
}

impl<R: Read> PackedArray<R> {
    /// Wrap a reader positioned at the start of an NPY stream
    ///
    /// When `available_len` is known the payload size is checked against it.
    pub fn from_reader(mut reader: R, available_len: Option<u64>) -> PrepResult<Self> {
        let header = NpyHeader::read_from(&mut reader)?;

        if header.fortran_order {
            return Err(PrepError::MalformedArray(
                "Fortran-ordered arrays are not supported".to_string(),
            ));
        }
        if header.shape.len() != 4 || header.shape[3] != 3 {
            return Err(PrepError::MalformedArray(format!(
                "expected shape (N, H, W, 3), got {}",
                header.shape_string()
            )));
        }
        if header.shape[1] == 0 || header.shape[2] == 0 {
            return Err(PrepError::MalformedArray(format!(
                "image dimensions must be positive, got {}",
                header.shape_string()
            )));
        }
        if header.shape[1] > u32::MAX as usize || header.shape[2] > u32::MAX as usize {
            return Err(PrepError::MalformedArray(format!(
                "image dimensions exceed {} pixels, got {}",
                u32::MAX,
                header.shape_string()
            )));
        }

        let payload_len = header.payload_len()?;
        let element_len = header.element_len()?;
        if let Some(len) = available_len {
            let needed = header
                .data_offset
                .checked_add(payload_len)
                .ok_or_else(|| PrepError::MalformedArray("payload size overflows".to_string()))?;
            if len < needed {
                return Err(PrepError::MalformedArray(format!(
                    "truncated payload: {} bytes present, {} expected",
                    len, needed
                )));
            }
        }

        let (height, width, channels) = (header.shape[1], header.shape[2], header.shape[3]);
        Ok(PackedArray {
            header,
            reader,
            height,
            width,
            channels,
            element_len,
            next_index: 0,
        })
    }

    pub fn header(&self) -> &NpyHeader {
        &self.header
    }

    /// Number of images in the stack
    pub fn len(&self) -> usize {
        self.header.shape[0]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sample_type(&self) -> SampleType {
        self.header.sample_type
    }

    /// (height, width, channels) of each element
    pub fn image_shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, self.channels)
    }

    fn read_element(&mut self) -> PrepResult<RawImage> {
        let mut bytes = vec![0u8; self.element_len];
        self.reader.read_exact(&mut bytes)?;

        let samples = match self.header.endianness {
            Endianness::Little => decode_samples::<LittleEndian>(self.header.sample_type, bytes),
            Endianness::Big => decode_samples::<BigEndian>(self.header.sample_type, bytes),
        };
        RawImage::new(
            self.height,
            self.width,
            self.channels,
            self.header.sample_type,
            samples,
        )
    }
}

impl<R: Read> Iterator for PackedArray<R> {
    type Item = PrepResult<RawImage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.len() {
            return None;
        }
        let result = self.read_element();
        self.next_index = if result.is_ok() { self.next_index + 1 } else { self.len() };
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len().saturating_sub(self.next_index);
        (remaining, Some(remaining))
    }
}

fn decode_samples<B: ByteOrder>(sample_type: SampleType, bytes: Vec<u8>) -> Samples {
    match sample_type {
        SampleType::U8 => Samples::U8(bytes),
        SampleType::Bool => Samples::Int(bytes.into_iter().map(|b| (b != 0) as i64).collect()),
        SampleType::I8 => Samples::Int(bytes.into_iter().map(|b| b as i8 as i64).collect()),
        SampleType::U16 => {
            let mut out = vec![0u16; bytes.len() / 2];
            B::read_u16_into(&bytes, &mut out);
            Samples::Int(out.into_iter().map(i64::from).collect())
        }
        SampleType::I16 => {
            let mut out = vec![0i16; bytes.len() / 2];
            B::read_i16_into(&bytes, &mut out);
            Samples::Int(out.into_iter().map(i64::from).collect())
        }
        SampleType::U32 => {
            let mut out = vec![0u32; bytes.len() / 4];
            B::read_u32_into(&bytes, &mut out);
            Samples::Int(out.into_iter().map(i64::from).collect())
        }
        SampleType::I32 => {
            let mut out = vec![0i32; bytes.len() / 4];
            B::read_i32_into(&bytes, &mut out);
            Samples::Int(out.into_iter().map(i64::from).collect())
        }
        SampleType::U64 => {
            let mut out = vec![0u64; bytes.len() / 8];
            B::read_u64_into(&bytes, &mut out);
            // Wrapping conversion keeps the low byte
            Samples::Int(out.into_iter().map(|v| v as i64).collect())
        }
        SampleType::I64 => {
            let mut out = vec![0i64; bytes.len() / 8];
            B::read_i64_into(&bytes, &mut out);
            Samples::Int(out)
        }
        SampleType::F32 => {
            let mut out = vec![0f32; bytes.len() / 4];
            B::read_f32_into(&bytes, &mut out);
            Samples::F32(out)
        }
        SampleType::F64 => {
            let mut out = vec![0f64; bytes.len() / 8];
            B::read_f64_into(&bytes, &mut out);
            Samples::F64(out)
        }
    }
}

/// Location of a fold's packed image array
pub fn packed_array_path(root: &Path, fold: &str, relative: &Path) -> PathBuf {
    root.join(fold).join(relative)
}
