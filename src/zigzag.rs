//! Zigzag serialization of quantized 8x8 blocks
//!
//! Walks the block along alternating up-right/down-left diagonals starting
//! at `[0][0]`, reflecting at each edge. This traversal is mandated by the
//! bitstream format: it clusters the zero coefficients produced by
//! quantization into trailing runs that the entropy stage collapses.

use crate::consts::{BLOCK_SIZE, BLOCK_SIZE2};
use crate::error::Result;
use crate::matrix::Matrix;

/// Diagonal walker over an 8x8 grid, reflecting at the edges
struct ScanWalker {
    row: i32,
    col: i32,
    direction: usize,
}

const DIRS: [(i32, i32); 2] = [(-1, 1), (1, -1)];

impl ScanWalker {
    fn new() -> Self {
        Self {
            row: 0,
            col: 0,
            direction: 0,
        }
    }

    fn position(&self) -> (usize, usize) {
        (self.row as usize, self.col as usize)
    }

    fn advance(&mut self) {
        let side = BLOCK_SIZE as i32;
        self.row += DIRS[self.direction].0;
        self.col += DIRS[self.direction].1;

        if self.row >= side {
            self.row = side - 1;
            self.col += 2;
            self.direction = 1 - self.direction;
        }
        if self.col >= side {
            self.col = side - 1;
            self.row += 2;
            self.direction = 1 - self.direction;
        }
        if self.row < 0 {
            self.row = 0;
            self.direction = 1 - self.direction;
        }
        if self.col < 0 {
            self.col = 0;
            self.direction = 1 - self.direction;
        }
    }
}

/// Serialize a quantized block into a 64-element sequence in zigzag order
#[must_use]
pub fn zigzag_order(block: &Matrix) -> [i32; BLOCK_SIZE2] {
    debug_assert_eq!(block.rows(), BLOCK_SIZE);
    debug_assert_eq!(block.cols(), BLOCK_SIZE);

    let mut output = [0i32; BLOCK_SIZE2];
    let mut walker = ScanWalker::new();
    for slot in output.iter_mut() {
        *slot = block[walker.position()] as i32;
        walker.advance();
    }
    output
}

/// Rebuild an 8x8 block from a zigzag-ordered sequence.
///
/// Inverse of [`zigzag_order`]; the decoder side of the scan, kept here so
/// the traversal can be verified round-trip.
pub fn unzigzag(sequence: &[i32; BLOCK_SIZE2]) -> Result<Matrix> {
    let mut block = Matrix::alloc(BLOCK_SIZE, BLOCK_SIZE)?;
    let mut walker = ScanWalker::new();
    for &value in sequence.iter() {
        block[walker.position()] = value as f32;
        walker.advance();
    }
    Ok(block)
}
