use std::fs;
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use image::{Rgb, RgbImage};

/// Builds an NPY 1.0 stream with the given descriptor, shape and payload
pub fn npy_bytes(descr: &str, shape: &[usize], payload: &[u8]) -> Vec<u8> {
    let dims: Vec<String> = shape.iter().map(|d| d.to_string()).collect();
    let header_str = format!(
        "{{'descr': '{}', 'fortran_order': False, 'shape': ({}), }}",
        descr,
        dims.join(", ")
    );
    let header_len = header_str.len() + 1;
    let padding_len = (64 - ((header_len + 10) % 64)) % 64;
    let padded_header = format!("{}{}\n", header_str, " ".repeat(padding_len));

    let mut buffer = Vec::new();
    buffer.extend_from_slice(b"\x93NUMPY");
    buffer.extend_from_slice(&[0x01, 0x00]);
    buffer.write_u16::<LittleEndian>(padded_header.len() as u16).unwrap();
    buffer.extend_from_slice(padded_header.as_bytes());
    buffer.extend_from_slice(payload);
    buffer
}

/// Stack of square float64 RGB images, each filled with one value
pub fn f64_stack(size: usize, values: &[f64]) -> Vec<u8> {
    let mut payload = Vec::new();
    for &v in values {
        for _ in 0..size * size * 3 {
            payload.write_f64::<LittleEndian>(v).unwrap();
        }
    }
    npy_bytes("<f8", &[values.len(), size, size, 3], &payload)
}

pub fn save_solid(path: &Path, size: u32, rgb: [u8; 3]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbImage::from_pixel(size, size, Rgb(rgb)).save(path).unwrap();
}

pub fn write_fold(root: &Path, fold: &str, bytes: &[u8]) {
    let images = root.join(fold).join("images");
    fs::create_dir_all(&images).unwrap();
    fs::write(images.join("images.npy"), bytes).unwrap();
}

pub fn count_files(dir: &Path) -> usize {
    fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}
