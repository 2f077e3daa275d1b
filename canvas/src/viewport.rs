#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::consts::{DEFAULT_CELL_PX, GRID_SIZE, MAX_CELL_PX, MIN_CELL_PX};
use crate::grid::Cell;

/// A point in screen space (CSS pixels) or fractional grid space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pan/zoom projection of the grid onto the canvas.
///
/// `pan_x` / `pan_y` are the screen position of the grid's top-left corner in
/// CSS pixels. `cell_px` is the on-screen size of one cell and always lies in
/// [`MIN_CELL_PX`, `MAX_CELL_PX`]. Pan is free-floating: the grid may be
/// dragged entirely off screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub pan_x: f64,
    pub pan_y: f64,
    pub cell_px: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, cell_px: DEFAULT_CELL_PX }
    }
}

impl Viewport {
    /// Convert a screen point to fractional grid coordinates.
    #[must_use]
    pub fn screen_to_grid(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.cell_px,
            y: (screen.y - self.pan_y) / self.cell_px,
        }
    }

    /// Convert fractional grid coordinates to a screen point.
    #[must_use]
    pub fn grid_to_screen(&self, grid: Point) -> Point {
        Point {
            x: grid.x * self.cell_px + self.pan_x,
            y: grid.y * self.cell_px + self.pan_y,
        }
    }

    /// Cell under a screen point. The result may be off the map.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_cell(&self, screen: Point) -> Cell {
        let g = self.screen_to_grid(screen);
        Cell::new(g.x.floor() as i32, g.y.floor() as i32)
    }

    /// Screen position of a cell's top-left corner.
    #[must_use]
    pub fn cell_origin(&self, cell: Cell) -> Point {
        self.grid_to_screen(Point::new(f64::from(cell.x), f64::from(cell.y)))
    }

    /// On-screen side length of the whole map.
    #[must_use]
    pub fn grid_px(&self) -> f64 {
        f64::from(GRID_SIZE) * self.cell_px
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Rescale by `factor`, keeping the grid point under `screen` fixed.
    ///
    /// The resulting cell size is clamped, so the effective factor may be
    /// smaller than requested (or 1 at the limits).
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        let old = self.cell_px;
        let new = (old * factor).clamp(MIN_CELL_PX, MAX_CELL_PX);
        let ratio = new / old;
        self.pan_x = screen.x - (screen.x - self.pan_x) * ratio;
        self.pan_y = screen.y - (screen.y - self.pan_y) * ratio;
        self.cell_px = new;
    }

    /// Center the map in a canvas of the given size, never at a negative offset.
    pub fn center_in(&mut self, width: f64, height: f64) {
        let size = self.grid_px();
        self.pan_x = ((width - size) / 2.0).max(0.0);
        self.pan_y = ((height - size) / 2.0).max(0.0);
    }
}
