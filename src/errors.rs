//! Custom error types for dataset preparation

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Preparation error types
#[derive(Debug)]
pub enum PrepError {
    /// I/O error
    IoError(io::Error),
    /// Image decoding or encoding error
    ImageError(image::ImageError),
    /// A required file or directory does not exist
    MissingPath(PathBuf),
    /// The NPY header could not be parsed
    InvalidNpyHeader(String),
    /// The NPY dtype descriptor is not supported
    UnsupportedDtype(String),
    /// Array shape or payload does not describe a stack of 3-channel images
    MalformedArray(String),
    /// Configuration value is out of range or has the wrong type
    InvalidConfig(String),
    /// A collection is too small to be split into train and test subsets
    EmptySplit { total: usize, test: usize },
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for PrepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrepError::IoError(e) => write!(f, "I/O error: {}", e),
            PrepError::ImageError(e) => write!(f, "Image error: {}", e),
            PrepError::MissingPath(p) => write!(f, "Path not found: {}", p.display()),
            PrepError::InvalidNpyHeader(msg) => write!(f, "Invalid NPY header: {}", msg),
            PrepError::UnsupportedDtype(d) => write!(f, "Unsupported array dtype: {}", d),
            PrepError::MalformedArray(msg) => write!(f, "Malformed array: {}", msg),
            PrepError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            PrepError::EmptySplit { total, test } => write!(
                f,
                "Cannot split {} samples with {} held out: train subset would be empty",
                total, test
            ),
            PrepError::GenericError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PrepError {}

impl From<io::Error> for PrepError {
    fn from(error: io::Error) -> Self {
        PrepError::IoError(error)
    }
}

impl From<image::ImageError> for PrepError {
    fn from(error: image::ImageError) -> Self {
        PrepError::ImageError(error)
    }
}

impl From<String> for PrepError {
    fn from(msg: String) -> Self {
        PrepError::GenericError(msg)
    }
}

/// Result type for preparation operations
pub type PrepResult<T> = Result<T, PrepError>;
