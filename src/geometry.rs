//! Terminal geometry and canvas allocation.
//!
//! A canvas is a flat byte buffer holding one fixed-width slot per
//! character cell. Each slot carries an optional color escape, the cell's
//! content byte and, for the last cell of a drawn row, the reset sequence.

use crate::color::{MAX_ESCAPE_LEN, RESET};

/// Bytes reserved per character cell.
pub const CELL_SIZE: usize = 15;

/// ASCII space, the content byte of a blank cell.
pub const SPACE: u8 = b' ';

// A cell must hold the longest escape, one content byte and the reset.
const _: () = assert!(MAX_ESCAPE_LEN + 1 + RESET.len() <= CELL_SIZE);

/// Current terminal size in cells and in canvas bytes.
///
/// Replaced wholesale on resize. `row_size` is always `cols * col_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    rows: usize,
    cols: usize,
    row_size: usize,
    col_size: usize,
}

impl Geometry {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            row_size: cols * CELL_SIZE,
            col_size: CELL_SIZE,
        }
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Bytes per screen row.
    pub const fn row_size(&self) -> usize {
        self.row_size
    }

    /// Bytes per character cell.
    pub const fn col_size(&self) -> usize {
        self.col_size
    }

    /// Byte offset of cell `(x, y)`.
    pub const fn cell_index(&self, x: usize, y: usize) -> usize {
        y * self.row_size + x * self.col_size
    }

    /// Allocate a blank canvas for this geometry.
    ///
    /// Every cell slot starts with a space so an undrawn canvas flushes as
    /// blank screen rather than NUL bytes.
    pub fn canvas(&self) -> Vec<u8> {
        let mut canvas = vec![0u8; self.rows * self.row_size];
        if self.col_size == 0 {
            return canvas;
        }
        for cell in canvas.chunks_exact_mut(self.col_size) {
            cell[0] = SPACE;
        }
        canvas
    }
}

impl std::fmt::Display for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}
