//! Pipeline orchestrator
//!
//! Drives the full transform-and-entropy-coding pipeline over an image:
//! per 8x8 block position in raster order, the Y, Cb and Cr blocks are
//! extracted (centered by -128, edges replicated), transformed, quantized,
//! zigzag-serialized and entropy-coded into the bit writer. Channel 0 uses
//! the luminance table pair, channels 1-2 the chrominance pair. The output
//! is the raw entropy-coded scan; no container markers are written.

use std::io::Write;

use tracing::debug;

use crate::bitstream::BitWriter;
use crate::consts::BLOCK_SIZE;
use crate::entropy::encode_block;
use crate::error::{Error, Result};
use crate::huffman::HuffmanTables;
use crate::image::Image;
use crate::matrix::Matrix;
use crate::types::ChannelClass;
use crate::zigzag::zigzag_order;
use crate::{dct, quant};

/// Compression pipeline with its own Huffman table registry.
///
/// The four standard tables are owned here (not process-global); their codes
/// are generated on first use per channel class and memoized, so reusing one
/// `Compressor` across images pays the table construction cost once.
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    tables: HuffmanTables,
}

impl Compressor {
    /// Create a compressor with the standard table set
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: HuffmanTables::standard(),
        }
    }

    /// Compress `image` into `sink`, returning the number of bytes written.
    ///
    /// The image must have exactly 3 interleaved channels. The YCbCr buffer
    /// is derived (and cached on the image) if not already present. On I/O
    /// or allocation failure the written prefix must be treated as corrupt;
    /// there is no partial success for an image.
    pub fn compress<W: Write>(&mut self, image: &mut Image, sink: W) -> Result<u64> {
        if image.channels() != Image::REQUIRED_CHANNELS {
            return Err(Error::UnsupportedChannels {
                expected: Image::REQUIRED_CHANNELS,
                actual: image.channels(),
            });
        }
        let width = image.width();
        let height = image.height();
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions {
                width,
                height,
                reason: "dimensions must be non-zero",
            });
        }

        let ycbcr = image.ensure_ycbcr()?;

        let width_blocks = width.div_ceil(BLOCK_SIZE);
        let height_blocks = height.div_ceil(BLOCK_SIZE);
        debug!(
            width,
            height,
            blocks = width_blocks * height_blocks,
            "compressing image"
        );

        let mut writer = BitWriter::new(sink);
        let mut last_dc = [0i32; Image::REQUIRED_CHANNELS];

        for by in 0..height_blocks {
            for bx in 0..width_blocks {
                for channel in 0..Image::REQUIRED_CHANNELS {
                    let class = ChannelClass::for_channel(channel);

                    let mut block = extract_block(ycbcr, width, height, channel, bx, by)?;
                    dct::forward_dct(&mut block);
                    quant::quantize(&mut block, class);
                    let sequence = zigzag_order(&block);

                    let (dc_table, ac_table) = self.tables.prepared_pair(class);
                    last_dc[channel] =
                        encode_block(&sequence, last_dc[channel], dc_table, ac_table, &mut writer)?;
                }
            }
        }

        // The writer never flushes a partial unit itself; end the scan here
        writer.flush()?;
        debug!(bytes = writer.bytes_written(), "scan complete");
        Ok(writer.bytes_written())
    }

    /// Compress `image` into a fresh byte vector
    pub fn compress_to_vec(&mut self, image: &mut Image) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.compress(image, &mut output)?;
        Ok(output)
    }
}

/// Compress an image with a one-off [`Compressor`]
pub fn compress_image<W: Write>(image: &mut Image, sink: W) -> Result<u64> {
    Compressor::new().compress(image, sink)
}

/// Extract one channel's 8x8 block, centered by -128, edges replicated
fn extract_block(
    ycbcr: &[u8],
    width: usize,
    height: usize,
    channel: usize,
    bx: usize,
    by: usize,
) -> Result<Matrix> {
    let mut block = Matrix::alloc(BLOCK_SIZE, BLOCK_SIZE)?;
    let start_x = bx * BLOCK_SIZE;
    let start_y = by * BLOCK_SIZE;

    for dy in 0..BLOCK_SIZE {
        let y = (start_y + dy).min(height - 1);
        for dx in 0..BLOCK_SIZE {
            let x = (start_x + dx).min(width - 1);
            let sample = ycbcr[(y * width + x) * Image::REQUIRED_CHANNELS + channel];
            block[(dy, dx)] = sample as f32 - 128.0;
        }
    }
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_image(width: usize, height: usize, rgb: [u8; 3]) -> Image {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        Image::from_decoded(data, width, height, 3).unwrap()
    }

    #[test]
    fn test_rejects_wrong_channel_count() {
        let mut image = Image::new(8, 8, 1).unwrap();
        let result = Compressor::new().compress(&mut image, Vec::new());
        assert!(matches!(
            result,
            Err(Error::UnsupportedChannels {
                expected: 3,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_rejects_empty_image() {
        let mut image = Image::new(0, 0, 3).unwrap();
        let result = Compressor::new().compress(&mut image, Vec::new());
        assert!(matches!(result, Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn test_output_is_whole_units() {
        let mut image = uniform_image(16, 16, [200, 40, 90]);
        let bytes = Compressor::new()
            .compress_to_vec(&mut image)
            .unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(bytes.len() % 2, 0);
    }

    #[test]
    fn test_extract_block_replicates_edges() {
        // 4x4 image: blocks past the edge repeat the last row/column
        let ycbcr: Vec<u8> = (0..4 * 4 * 3).map(|i| (i % 251) as u8).collect();
        let block = extract_block(&ycbcr, 4, 4, 0, 0, 0).unwrap();

        // In-range corner
        assert_eq!(block[(0, 0)], ycbcr[0] as f32 - 128.0);
        // Past the right edge: column 3 repeats
        assert_eq!(block[(0, 7)], block[(0, 3)]);
        // Past the bottom edge: row 3 repeats
        assert_eq!(block[(7, 0)], block[(3, 0)]);
        assert_eq!(block[(7, 7)], block[(3, 3)]);
    }

    #[test]
    fn test_lazy_table_generation_per_class() {
        use crate::types::CoefficientClass;

        let mut compressor = Compressor::new();
        assert!(!compressor
            .tables
            .table(ChannelClass::Luma, CoefficientClass::Dc)
            .is_generated());

        let mut image = uniform_image(8, 8, [128, 128, 128]);
        compressor.compress(&mut image, Vec::new()).unwrap();

        for channel in [ChannelClass::Luma, ChannelClass::Chroma] {
            for coefficient in [CoefficientClass::Dc, CoefficientClass::Ac] {
                assert!(compressor.tables.table(channel, coefficient).is_generated());
            }
        }
    }
}
