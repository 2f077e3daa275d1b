//! Grid cells and rectangular cell ranges.
//!
//! A [`Cell`] is one addressable unit of the 100×100 map. Ownership, images
//! and timestamps live in the backend; the canvas only ever deals in
//! coordinates. [`SelectionRect`] is the raw drag gesture (start and end
//! cell, in drag order) and [`CellRect`] its normalized, inclusive form.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use serde::{Deserialize, Serialize};

use crate::consts::GRID_SIZE;

/// A grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the cell lies on the map.
    #[must_use]
    pub fn in_bounds(self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }

    /// Nearest on-map cell.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self { x: self.x.clamp(0, GRID_SIZE - 1), y: self.y.clamp(0, GRID_SIZE - 1) }
    }

    /// 4-connected neighbours: up, right, down, left.
    #[must_use]
    pub fn neighbors(self) -> [Self; 4] {
        [
            Self::new(self.x, self.y - 1),
            Self::new(self.x + 1, self.y),
            Self::new(self.x, self.y + 1),
            Self::new(self.x - 1, self.y),
        ]
    }
}

/// An inclusive, normalized rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl CellRect {
    /// Rectangle spanned by two corner cells in any order.
    #[must_use]
    pub fn from_corners(a: Cell, b: Cell) -> Self {
        Self { min_x: a.x.min(b.x), min_y: a.y.min(b.y), max_x: a.x.max(b.x), max_y: a.y.max(b.y) }
    }

    /// Smallest rectangle containing every cell, or `None` for no cells.
    #[must_use]
    pub fn bounding(cells: &[Cell]) -> Option<Self> {
        let first = *cells.first()?;
        Some(cells.iter().fold(Self::from_corners(first, first), |rect, c| Self {
            min_x: rect.min_x.min(c.x),
            min_y: rect.min_y.min(c.y),
            max_x: rect.max_x.max(c.x),
            max_y: rect.max_y.max(c.y),
        }))
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x).unsigned_abs() + 1
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y).unsigned_abs() + 1
    }

    /// Number of cells covered.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        (self.min_x..=self.max_x).contains(&cell.x) && (self.min_y..=self.max_y).contains(&cell.y)
    }

    /// Top-left cell.
    #[must_use]
    pub fn origin(&self) -> Cell {
        Cell::new(self.min_x, self.min_y)
    }

    /// Every covered cell in row-major order.
    #[must_use]
    pub fn cells(&self) -> Vec<Cell> {
        (self.min_y..=self.max_y)
            .flat_map(|y| (self.min_x..=self.max_x).map(move |x| Cell::new(x, y)))
            .collect()
    }
}

/// An in-progress or finalized drag selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRect {
    /// Cell under the pointer at pointer-down.
    pub start: Cell,
    /// Cell under the pointer most recently.
    pub end: Cell,
}

impl SelectionRect {
    #[must_use]
    pub fn at(cell: Cell) -> Self {
        Self { start: cell, end: cell }
    }

    #[must_use]
    pub fn normalized(&self) -> CellRect {
        CellRect::from_corners(self.start, self.end)
    }
}
