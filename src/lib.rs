//! # slimjpeg - minimal baseline JPEG compression core
//!
//! slimjpeg is the transform-and-entropy-coding heart of a JPEG-family
//! encoder: color transform, 8x8 block DCT, quantization, zigzag
//! serialization, canonical Huffman coding and a bit-precise stream writer
//! packing variable-length codes into big-endian 16-bit units.
//!
//! The output is the raw entropy-coded scan. Container parsing and header
//! writing are out of scope: decoding source images is the job of an image
//! codec library, and the companion decoder consumes the bare bitstream with
//! the standard tables supplied out of band.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use slimjpeg::{Compressor, Image};
//!
//! let mut image = Image::from_decoded(pixels, width, height, 3)?;
//! let mut compressor = Compressor::new();
//! let scan = compressor.compress_to_vec(&mut image)?;
//! ```
//!
//! ## Pipeline
//!
//! Per 8x8 block, per channel: extract (centered by -128) -> forward DCT ->
//! quantize against the standard step tables -> zigzag -> Huffman-encode
//! (differential DC, run-length AC) -> bit writer. Channel 0 uses the
//! luminance tables, channels 1-2 the chrominance tables.

// Core building blocks
mod consts;
mod error;
mod matrix;
mod types;

// Encoding pipeline
mod bitstream;
mod color;
mod dct;
mod encode;
mod entropy;
mod huffman;
mod image;
mod quant;
mod zigzag;

// Public API
pub use bitstream::{BitWriter, ACCUMULATOR_BITS};
pub use color::{rgb_to_ycbcr, ycbcr_to_rgb};
pub use dct::forward_dct;
pub use encode::{compress_image, Compressor};
pub use entropy::encode_block;
pub use error::Error;
pub use huffman::{HuffmanTable, HuffmanTables};
pub use image::{Image, PixelBuffer};
pub use matrix::Matrix;
pub use quant::quantize;
pub use types::{BufferOrigin, ChannelClass, CoefficientClass, ColorSpace};
pub use zigzag::{unzigzag, zigzag_order};

/// Result type for slimjpeg operations
pub type Result<T> = std::result::Result<T, Error>;
