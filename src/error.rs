//! Error types for slimjpeg

use std::fmt;
use std::io;

/// Result type for slimjpeg operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for slimjpeg operations
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid image dimensions
    InvalidDimensions {
        width: usize,
        height: usize,
        reason: &'static str,
    },
    /// Input image has the wrong number of interleaved channels
    UnsupportedChannels {
        expected: usize,
        actual: usize,
    },
    /// Pixel buffer length does not match width * height * channels
    InvalidPixelData {
        expected: usize,
        actual: usize,
    },
    /// Working-buffer allocation failed
    Allocation {
        bytes: usize,
    },
    /// Writing to the output stream failed
    Io(io::Error),
    /// Internal encoder error
    Internal(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimensions { width, height, reason } => {
                write!(f, "Invalid dimensions {}x{}: {}", width, height, reason)
            }
            Error::UnsupportedChannels { expected, actual } => {
                write!(f, "Expected {} channels, got {}", expected, actual)
            }
            Error::InvalidPixelData { expected, actual } => {
                write!(f, "Expected {} bytes of pixel data, got {}", expected, actual)
            }
            Error::Allocation { bytes } => {
                write!(f, "Failed to allocate {} bytes of working memory", bytes)
            }
            Error::Io(e) => write!(f, "Output stream error: {}", e),
            Error::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
