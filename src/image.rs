//! Image container consumed by the compression pipeline
//!
//! An [`Image`] owns its pixel buffer exactly once. The buffer's provenance
//! (external decoder vs. this crate) is recorded so handoff mistakes show up
//! in types instead of double frees; a single drop path releases either kind.

use imgref::ImgRef;
use rgb::RGB8;

use crate::color::convert_rgb_to_ycbcr;
use crate::error::{Error, Result};
use crate::types::{BufferOrigin, ColorSpace};

/// An owned pixel buffer tagged with its allocation provenance
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    origin: BufferOrigin,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap a buffer produced by an external decoder
    #[must_use]
    pub fn decoded(data: Vec<u8>) -> Self {
        Self {
            origin: BufferOrigin::Decoded,
            data,
        }
    }

    /// Wrap a buffer allocated by this crate
    #[must_use]
    pub fn synthetic(data: Vec<u8>) -> Self {
        Self {
            origin: BufferOrigin::Synthetic,
            data,
        }
    }

    /// Where this buffer came from
    #[must_use]
    pub fn origin(&self) -> BufferOrigin {
        self.origin
    }

    /// The raw bytes
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

/// A decoded still image plus its lazily derived YCbCr representation
#[derive(Debug, Clone)]
pub struct Image {
    width: usize,
    height: usize,
    channels: usize,
    pixels: PixelBuffer,
    ycbcr: Option<Vec<u8>>,
    color_space: ColorSpace,
}

impl Image {
    /// Number of interleaved channels the compression core expects
    pub const REQUIRED_CHANNELS: usize = 3;

    /// Build an image around a buffer handed over by an external decoder.
    ///
    /// The buffer must hold `width * height * channels` interleaved bytes.
    pub fn from_decoded(
        data: Vec<u8>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<Self> {
        Self::with_buffer(PixelBuffer::decoded(data), width, height, channels)
    }

    /// Build an image from an RGB pixel view, copying into an owned buffer
    pub fn from_rgb(pixels: ImgRef<'_, RGB8>) -> Result<Self> {
        let (width, height) = (pixels.width(), pixels.height());
        let len = width * height * Self::REQUIRED_CHANNELS;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| Error::Allocation { bytes: len })?;
        for row in pixels.rows() {
            for px in row {
                data.extend_from_slice(&[px.r, px.g, px.b]);
            }
        }
        Self::with_buffer(
            PixelBuffer::synthetic(data),
            width,
            height,
            Self::REQUIRED_CHANNELS,
        )
    }

    /// Allocate a zeroed self-owned image
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Self> {
        let len = width * height * channels;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| Error::Allocation { bytes: len })?;
        data.resize(len, 0);
        Self::with_buffer(PixelBuffer::synthetic(data), width, height, channels)
    }

    fn with_buffer(
        pixels: PixelBuffer,
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<Self> {
        let expected = width * height * channels;
        if pixels.as_slice().len() != expected {
            return Err(Error::InvalidPixelData {
                expected,
                actual: pixels.as_slice().len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            pixels,
            ycbcr: None,
            color_space: ColorSpace::Rgb,
        })
    }

    /// Image width in pixels
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of interleaved channels
    #[must_use]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Total pixel buffer size in bytes (width * height * channels)
    #[must_use]
    pub fn size(&self) -> usize {
        self.pixels.as_slice().len()
    }

    /// Color space of the primary pixel buffer
    #[must_use]
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Provenance of the primary pixel buffer
    #[must_use]
    pub fn buffer_origin(&self) -> BufferOrigin {
        self.pixels.origin()
    }

    /// The primary pixel buffer, read-only
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        self.pixels.as_slice()
    }

    /// Derive (once) and return the interleaved digital YCbCr buffer.
    ///
    /// Fails fast if the image does not have exactly 3 channels; the
    /// conversion formulas only make sense for RGB input.
    pub fn ensure_ycbcr(&mut self) -> Result<&[u8]> {
        if self.channels != Self::REQUIRED_CHANNELS {
            return Err(Error::UnsupportedChannels {
                expected: Self::REQUIRED_CHANNELS,
                actual: self.channels,
            });
        }
        Ok(self
            .ycbcr
            .get_or_insert_with(|| convert_rgb_to_ycbcr(self.pixels.as_slice())))
    }

    /// The derived YCbCr buffer, if [`Image::ensure_ycbcr`] has run
    #[must_use]
    pub fn ycbcr(&self) -> Option<&[u8]> {
        self.ycbcr.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgref::Img;

    #[test]
    fn test_size_invariant_enforced() {
        let result = Image::from_decoded(vec![0u8; 10], 2, 2, 3);
        assert!(matches!(
            result,
            Err(Error::InvalidPixelData {
                expected: 12,
                actual: 10
            })
        ));
    }

    #[test]
    fn test_provenance_tags() {
        let decoded = Image::from_decoded(vec![0u8; 12], 2, 2, 3).unwrap();
        assert_eq!(decoded.buffer_origin(), BufferOrigin::Decoded);

        let synthetic = Image::new(2, 2, 3).unwrap();
        assert_eq!(synthetic.buffer_origin(), BufferOrigin::Synthetic);
        assert_eq!(synthetic.size(), 12);
    }

    #[test]
    fn test_from_rgb_interleaves() {
        let pixels = vec![RGB8 { r: 255, g: 0, b: 0 }; 4];
        let img = Image::from_rgb(Img::new(pixels, 2, 2).as_ref()).unwrap();
        assert_eq!(img.pixels(), &[255, 0, 0, 255, 0, 0, 255, 0, 0, 255, 0, 0]);
        assert_eq!(img.buffer_origin(), BufferOrigin::Synthetic);
    }

    #[test]
    fn test_ensure_ycbcr_requires_three_channels() {
        let mut img = Image::new(2, 2, 1).unwrap();
        assert!(matches!(
            img.ensure_ycbcr(),
            Err(Error::UnsupportedChannels {
                expected: 3,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_ensure_ycbcr_caches() {
        let mut img = Image::new(2, 2, 3).unwrap();
        assert!(img.ycbcr().is_none());
        // All-black RGB -> Y=16, Cb=Cr=128
        let converted = img.ensure_ycbcr().unwrap().to_vec();
        assert_eq!(converted, vec![16, 128, 128, 16, 128, 128, 16, 128, 128, 16, 128, 128]);
        assert!(img.ycbcr().is_some());
    }
}
