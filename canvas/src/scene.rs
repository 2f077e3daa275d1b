//! Scene building: turns engine state into an ordered display list.
//!
//! The display list is a pure projection of viewport, image availability,
//! highlight edges and selection. [`crate::render`] replays it onto a 2D
//! context; tests inspect it directly.
//!
//! Layer order, bottom first:
//!
//! 1. base map image, scaled to the grid with smoothing off
//! 2. grid lines (only when cells are large enough to see them)
//! 3. ownership highlight borders
//! 4. selection rectangle fill, dashed outline, and size label

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::border::Edge;
use crate::consts::{GRID_LINE_MIN_CELL_PX, GRID_SIZE, LABEL_OFFSET_PX};
use crate::grid::CellRect;
use crate::viewport::{Point, Viewport};

/// An axis-aligned screen rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear { width: f64, height: f64 },
    MapImage(ScreenRect),
    GridLines(Vec<(Point, Point)>),
    Highlight(Vec<(Point, Point)>),
    SelectionFill(ScreenRect),
    SelectionOutline(ScreenRect),
    Label { text: String, at: Point },
}

/// Everything the scene depends on.
#[derive(Debug, Clone, Copy)]
pub struct SceneInput<'a> {
    pub viewport: &'a Viewport,
    pub width: f64,
    pub height: f64,
    pub has_image: bool,
    pub highlight: &'a [Edge],
    pub selection: Option<CellRect>,
}

/// Build the display list for one frame.
#[must_use]
pub fn build(input: &SceneInput<'_>) -> Vec<DrawOp> {
    let vp = input.viewport;
    let mut ops = vec![DrawOp::Clear { width: input.width, height: input.height }];

    if input.has_image {
        let size = vp.grid_px();
        ops.push(DrawOp::MapImage(ScreenRect { x: vp.pan_x, y: vp.pan_y, width: size, height: size }));
    }

    if vp.cell_px > GRID_LINE_MIN_CELL_PX {
        ops.push(DrawOp::GridLines(grid_lines(vp)));
    }

    if !input.highlight.is_empty() {
        ops.push(DrawOp::Highlight(input.highlight.iter().map(|e| e.screen_segment(vp)).collect()));
    }

    if let Some(rect) = input.selection {
        let screen = selection_screen_rect(vp, rect);
        ops.push(DrawOp::SelectionFill(screen));
        ops.push(DrawOp::SelectionOutline(screen));
        ops.push(DrawOp::Label {
            text: selection_label(rect),
            at: Point::new(screen.x, screen.y - LABEL_OFFSET_PX),
        });
    }

    ops
}

/// `GRID_SIZE + 1` vertical then `GRID_SIZE + 1` horizontal lines.
fn grid_lines(vp: &Viewport) -> Vec<(Point, Point)> {
    let size = vp.grid_px();
    let vertical = (0..=GRID_SIZE).map(|i| {
        let x = vp.pan_x + f64::from(i) * vp.cell_px;
        (Point::new(x, vp.pan_y), Point::new(x, vp.pan_y + size))
    });
    let horizontal = (0..=GRID_SIZE).map(|i| {
        let y = vp.pan_y + f64::from(i) * vp.cell_px;
        (Point::new(vp.pan_x, y), Point::new(vp.pan_x + size, y))
    });
    vertical.chain(horizontal).collect()
}

fn selection_screen_rect(vp: &Viewport, rect: CellRect) -> ScreenRect {
    let origin = vp.cell_origin(rect.origin());
    ScreenRect {
        x: origin.x,
        y: origin.y,
        width: f64::from(rect.width()) * vp.cell_px,
        height: f64::from(rect.height()) * vp.cell_px,
    }
}

/// Label shown above a selection, e.g. `3×2 (6 pixels)`.
#[must_use]
pub fn selection_label(rect: CellRect) -> String {
    let count = rect.cell_count();
    let noun = if count == 1 { "pixel" } else { "pixels" };
    format!("{}×{} ({count} {noun})", rect.width(), rect.height())
}
