//! Color space conversion feeding the compression core
//!
//! RGB is converted to digital-range YCbCr (+16 luma offset, +128 chroma
//! offset) with fixed coefficients. The weighted sums are truncated, not
//! rounded; the companion decoder applies the matching inverse, so the exact
//! truncating behavior here is part of the codec contract.

use rgb::RGB8;

/// Convert one RGB pixel to digital YCbCr.
///
/// - Y  =  0.257*R + 0.504*G + 0.098*B + 16
/// - Cb = -0.148*R - 0.291*G + 0.439*B + 128
/// - Cr =  0.439*R - 0.368*G - 0.071*B + 128
///
/// Each component is truncated to an 8-bit integer.
#[inline]
#[must_use]
pub fn rgb_to_ycbcr(px: RGB8) -> [u8; 3] {
    let r = px.r as f32;
    let g = px.g as f32;
    let b = px.b as f32;

    let y = 0.257 * r + 0.504 * g + 0.098 * b + 16.0;
    let cb = -0.148 * r - 0.291 * g + 0.439 * b + 128.0;
    let cr = 0.439 * r - 0.368 * g - 0.071 * b + 128.0;

    // `as u8` truncates toward zero and saturates at the type bounds
    [y as u8, cb as u8, cr as u8]
}

/// Convert one digital YCbCr triple back to RGB.
///
/// Inverse of [`rgb_to_ycbcr`]; used to verify conversions, not in the
/// encode path.
#[inline]
#[must_use]
pub fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> RGB8 {
    let y = y as f32 - 16.0;
    let cb = cb as f32 - 128.0;
    let cr = cr as f32 - 128.0;

    let r = 1.164 * y + 1.596 * cr;
    let g = 1.164 * y - 0.813 * cr - 0.392 * cb;
    let b = 1.164 * y + 2.017 * cb;

    RGB8 {
        r: r as u8,
        g: g as u8,
        b: b as u8,
    }
}

/// Convert an interleaved 3-channel RGB buffer to interleaved YCbCr
#[must_use]
pub fn convert_rgb_to_ycbcr(rgb: &[u8]) -> Vec<u8> {
    debug_assert_eq!(rgb.len() % 3, 0);

    let mut ycbcr = Vec::with_capacity(rgb.len());
    for chunk in rgb.chunks_exact(3) {
        let px = RGB8 {
            r: chunk[0],
            g: chunk[1],
            b: chunk[2],
        };
        ycbcr.extend_from_slice(&rgb_to_ycbcr(px));
    }
    ycbcr
}
