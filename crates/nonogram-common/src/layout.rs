//! Pixel geometry of a rendered nonogram.
//!
//! Cell `(row, col)` occupies
//! `x ∈ [margin_left + col*cell_size, margin_left + (col+1)*cell_size]` and
//! `y ∈ [margin_top + row*cell_size, margin_top + (row+1)*cell_size]`.
//! Renderer and overlay both compute coordinates here, so a fixture and its
//! overlays line up as long as the same [`LayoutConfig`] is used.

use serde::{Deserialize, Serialize};

use crate::{ConstraintSet, FixtureError, FixtureResult};

/// Blank space kept past the last gridline on the right and bottom edges.
pub const CANVAS_PADDING: u32 = 20;

/// Thickness of every gridline.
pub const GRID_STROKE: u32 = 2;

/// Inset of the filled square from each cell edge.
pub const FILL_INSET: i64 = 3;

/// Inset of the cross endpoints from each cell edge.
pub const CROSS_INSET: i64 = 5;

/// Row clues start this far left of the grid's left edge.
pub const ROW_CLUE_OFFSET: i64 = 60;

/// Column clues start this far above the grid's top edge.
pub const COLUMN_CLUE_OFFSET: i64 = 70;

/// Vertical distance between stacked column clue lines.
pub const COLUMN_CLUE_PITCH: i64 = 20;

/// Default cell size in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 40;

/// Default margin in pixels, used for both edges.
pub const DEFAULT_MARGIN: u32 = 100;

/// Per-invocation layout parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Side length of one cell in pixels
    pub cell_size: u32,
    /// Pixels reserved left of the grid for row clues
    pub margin_left: u32,
    /// Pixels reserved above the grid for column clues
    pub margin_top: u32,
}

impl LayoutConfig {
    /// Layout with the same margin on the left and top edges.
    pub fn new(cell_size: u32, margin: u32) -> Self {
        Self {
            cell_size,
            margin_left: margin,
            margin_top: margin,
        }
    }

    /// Layout with distinct left and top margins.
    pub fn with_margins(cell_size: u32, margin_left: u32, margin_top: u32) -> Self {
        Self {
            cell_size,
            margin_left,
            margin_top,
        }
    }

    pub fn validate(&self) -> FixtureResult<()> {
        if self.cell_size == 0 {
            return Err(FixtureError::InvalidLayout(
                "cell_size must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Pixel bounding box of a cell. Indices are not range-checked.
    pub fn cell_bounds(&self, row: usize, col: usize) -> CellBounds {
        let cell = self.cell_size as i64;
        let x1 = self.margin_left as i64 + col as i64 * cell;
        let y1 = self.margin_top as i64 + row as i64 * cell;
        CellBounds {
            x1,
            y1,
            x2: x1 + cell,
            y2: y1 + cell,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE, DEFAULT_MARGIN)
    }
}

/// Corner coordinates of one cell, gridline to gridline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBounds {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl CellBounds {
    /// Pixel at the middle of the cell (integer division, rounds toward the origin).
    pub fn center(&self) -> (i64, i64) {
        (
            self.x1 + (self.x2 - self.x1) / 2,
            self.y1 + (self.y2 - self.y1) / 2,
        )
    }

    /// Inclusive box shrunk by `inset` on every side, or `None` if nothing is left.
    pub fn inset(&self, inset: i64) -> Option<CellBounds> {
        let shrunk = CellBounds {
            x1: self.x1 + inset,
            y1: self.y1 + inset,
            x2: self.x2 - inset,
            y2: self.y2 - inset,
        };
        (shrunk.x1 <= shrunk.x2 && shrunk.y1 <= shrunk.y2).then_some(shrunk)
    }

    /// Area painted black for a filled cell.
    pub fn fill_area(&self) -> Option<CellBounds> {
        self.inset(FILL_INSET)
    }

    /// The two diagonals of a crossed cell: top-left to bottom-right, then
    /// bottom-left to top-right.
    pub fn cross_diagonals(&self) -> Option<[((i64, i64), (i64, i64)); 2]> {
        let b = self.inset(CROSS_INSET)?;
        Some([((b.x1, b.y1), (b.x2, b.y2)), ((b.x1, b.y2), (b.x2, b.y1))])
    }
}

/// Layout resolved against a specific grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub width: usize,
    pub height: usize,
    pub layout: LayoutConfig,
}

impl GridGeometry {
    pub fn new(width: usize, height: usize, layout: LayoutConfig) -> Self {
        Self {
            width,
            height,
            layout,
        }
    }

    pub fn for_constraints(constraints: &ConstraintSet, layout: LayoutConfig) -> Self {
        Self::new(constraints.width(), constraints.height(), layout)
    }

    /// Image size: margin + cells + fixed padding on each axis.
    pub fn canvas_size(&self) -> FixtureResult<(u32, u32)> {
        let axis = |margin: u32, cells: usize| -> Option<u32> {
            let cells = u32::try_from(cells).ok()?;
            margin
                .checked_add(cells.checked_mul(self.layout.cell_size)?)?
                .checked_add(CANVAS_PADDING)
        };

        match (
            axis(self.layout.margin_left, self.width),
            axis(self.layout.margin_top, self.height),
        ) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(FixtureError::InvalidLayout(format!(
                "{}x{} grid at cell_size={} does not fit in an image",
                self.width, self.height, self.layout.cell_size
            ))),
        }
    }

    /// Grid rectangle `(left, top, right, bottom)` on the outer gridlines.
    pub fn grid_extent(&self) -> (i64, i64, i64, i64) {
        let left = self.layout.margin_left as i64;
        let top = self.layout.margin_top as i64;
        let cell = self.layout.cell_size as i64;
        (
            left,
            top,
            left + self.width as i64 * cell,
            top + self.height as i64 * cell,
        )
    }

    /// y coordinates of the `height + 1` horizontal gridlines.
    pub fn horizontal_lines(&self) -> impl Iterator<Item = i64> + '_ {
        let top = self.layout.margin_top as i64;
        let cell = self.layout.cell_size as i64;
        (0..=self.height).map(move |i| top + i as i64 * cell)
    }

    /// x coordinates of the `width + 1` vertical gridlines.
    pub fn vertical_lines(&self) -> impl Iterator<Item = i64> + '_ {
        let left = self.layout.margin_left as i64;
        let cell = self.layout.cell_size as i64;
        (0..=self.width).map(move |i| left + i as i64 * cell)
    }

    /// Anchor for a row clue: the text's left edge and the row's mid-line.
    pub fn row_clue_anchor(&self, row: usize) -> (i64, i64) {
        let cell = self.layout.cell_size as i64;
        (
            self.layout.margin_left as i64 - ROW_CLUE_OFFSET,
            self.layout.margin_top as i64 + row as i64 * cell + cell / 2,
        )
    }

    /// Anchor for a column clue: the column's mid-line and the first line's top.
    pub fn column_clue_anchor(&self, col: usize) -> (i64, i64) {
        let cell = self.layout.cell_size as i64;
        (
            self.layout.margin_left as i64 + col as i64 * cell + cell / 2,
            self.layout.margin_top as i64 - COLUMN_CLUE_OFFSET,
        )
    }

    pub fn cell_bounds(&self, row: usize, col: usize) -> CellBounds {
        self.layout.cell_bounds(row, col)
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }
}
