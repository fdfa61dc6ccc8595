//! Entropy encoding of quantized, zigzag-ordered blocks
//!
//! The DC coefficient is coded differentially against the previous block of
//! the same channel: a category symbol (bit size of the difference) followed
//! by that many magnitude bits. AC coefficients are run-length coded as
//! (zero-run, bit-size) symbols, with ZRL standing in for runs of 16 zeros
//! and EOB terminating the block once the remaining tail is all zero.

use std::io::Write;

use crate::bitstream::BitWriter;
use crate::consts::BLOCK_SIZE2;
use crate::error::{Error, Result};
use crate::huffman::HuffmanTable;

/// Number of bits needed for the magnitude of `value` (JPEG category)
#[must_use]
pub fn bit_size(value: i32) -> u8 {
    if value == 0 {
        0
    } else {
        (32 - value.unsigned_abs().leading_zeros()) as u8
    }
}

/// Magnitude bits for `value` in a `size`-bit field.
///
/// Negative values are sent as `value + 2^size - 1`, so their leading bit is
/// zero and the decoder recovers them by one's complement.
fn magnitude_bits(value: i32, size: u8) -> u16 {
    if value < 0 {
        (value + (1 << size) - 1) as u16
    } else {
        value as u16
    }
}

/// Entropy-code one zigzag-ordered block.
///
/// `prev_dc` is the DC level of the previous block on the same channel (zero
/// for the first block); the block's own DC level is returned so the caller
/// can chain it. Both tables must have their codes generated.
pub fn encode_block<W: Write>(
    sequence: &[i32; BLOCK_SIZE2],
    prev_dc: i32,
    dc_table: &HuffmanTable,
    ac_table: &HuffmanTable,
    writer: &mut BitWriter<W>,
) -> Result<i32> {
    // DC: category symbol, then the difference's magnitude bits
    let dc = sequence[0];
    let diff = dc - prev_dc;
    let category = bit_size(diff);
    let (code, len) = dc_table
        .lookup(category)
        .ok_or(Error::Internal("DC category missing from Huffman table"))?;
    writer.push(code, len)?;
    if category > 0 {
        writer.push(magnitude_bits(diff, category), category)?;
    }

    // AC: run-length coded (run, size) symbols
    let mut run = 0u8;
    for &coefficient in &sequence[1..] {
        if coefficient == 0 {
            run += 1;
            continue;
        }

        while run >= 16 {
            let (code, len) = ac_table
                .zrl()
                .ok_or(Error::Internal("ZRL not cached on AC table"))?;
            writer.push(code, len)?;
            run -= 16;
        }

        let size = bit_size(coefficient);
        let symbol = (run << 4) | size;
        let (code, len) = ac_table
            .lookup(symbol)
            .ok_or(Error::Internal("AC run/size symbol missing from Huffman table"))?;
        writer.push(code, len)?;
        writer.push(magnitude_bits(coefficient, size), size)?;
        run = 0;
    }

    // Any trailing zeros collapse into a single EOB
    if run > 0 {
        let (code, len) = ac_table
            .eob()
            .ok_or(Error::Internal("EOB not cached on AC table"))?;
        writer.push(code, len)?;
    }

    Ok(dc)
}
