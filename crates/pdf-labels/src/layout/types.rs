//! Layout data types
//!
//! Pixel-space values shared by the geometry resolver, the compositor and the
//! sheet assembler. Coordinates are signed because explicit label sizes and
//! inflated images may legitimately land outside the sheet.

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major position for a 0-based ordinal
    pub fn from_ordinal(pos: usize, cols: usize) -> Self {
        Self {
            row: pos / cols,
            col: pos % cols,
        }
    }
}

/// A rectangle in pixels, origin at the top-left of the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl PixelRect {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub fn right(&self) -> i64 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i64 {
        self.y + self.height
    }

    pub fn intersects(&self, other: &PixelRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
