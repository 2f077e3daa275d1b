#![allow(clippy::float_cmp)]

use super::*;
use crate::area::OwnerIndex;
use crate::border::owner_edges;
use crate::grid::Cell;

fn input<'a>(vp: &'a Viewport, highlight: &'a [Edge], selection: Option<CellRect>) -> SceneInput<'a> {
    SceneInput { viewport: vp, width: 800.0, height: 600.0, has_image: true, highlight, selection }
}

fn has_grid(ops: &[DrawOp]) -> bool {
    ops.iter().any(|op| matches!(op, DrawOp::GridLines(_)))
}

// =============================================================
// Layers
// =============================================================

#[test]
fn clear_comes_first() {
    let vp = Viewport::default();
    let ops = build(&input(&vp, &[], None));
    assert_eq!(ops[0], DrawOp::Clear { width: 800.0, height: 600.0 });
}

#[test]
fn map_image_spans_whole_grid() {
    let vp = Viewport { pan_x: 5.0, pan_y: 7.0, cell_px: 4.0 };
    let ops = build(&input(&vp, &[], None));
    assert!(ops.contains(&DrawOp::MapImage(ScreenRect { x: 5.0, y: 7.0, width: 400.0, height: 400.0 })));
}

#[test]
fn no_image_no_image_op() {
    let vp = Viewport::default();
    let mut scene = input(&vp, &[], None);
    scene.has_image = false;
    assert!(!build(&scene).iter().any(|op| matches!(op, DrawOp::MapImage(_))));
}

#[test]
fn grid_lines_only_above_five_pixels() {
    let small = Viewport { cell_px: 5.0, ..Viewport::default() };
    let large = Viewport { cell_px: 6.0, ..Viewport::default() };
    assert!(!has_grid(&build(&input(&small, &[], None))));
    assert!(has_grid(&build(&input(&large, &[], None))));
}

#[test]
fn grid_has_line_per_boundary() {
    let vp = Viewport::default();
    let ops = build(&input(&vp, &[], None));
    let Some(DrawOp::GridLines(lines)) = ops.iter().find(|op| matches!(op, DrawOp::GridLines(_))) else {
        panic!("grid lines missing");
    };
    assert_eq!(lines.len(), 2 * (GRID_SIZE as usize + 1));
}

#[test]
fn highlight_drawn_after_grid() {
    let idx = OwnerIndex::from_pairs(vec![(Cell::new(1, 1), "0xa")]);
    let edges = owner_edges(&idx, "0xa");
    let vp = Viewport::default();
    let ops = build(&input(&vp, &edges, None));
    let grid_at = ops.iter().position(|op| matches!(op, DrawOp::GridLines(_))).expect("grid");
    let hl_at = ops.iter().position(|op| matches!(op, DrawOp::Highlight(_))).expect("highlight");
    assert!(hl_at > grid_at);
    let DrawOp::Highlight(segments) = &ops[hl_at] else { panic!("highlight") };
    assert_eq!(segments.len(), 4);
}

#[test]
fn selection_is_drawn_last_with_label() {
    let vp = Viewport::default();
    let rect = CellRect::from_corners(Cell::new(2, 3), Cell::new(4, 4));
    let ops = build(&input(&vp, &[], Some(rect)));
    let n = ops.len();
    assert_eq!(ops[n - 3], DrawOp::SelectionFill(ScreenRect { x: 20.0, y: 30.0, width: 30.0, height: 20.0 }));
    assert!(matches!(ops[n - 2], DrawOp::SelectionOutline(_)));
    let DrawOp::Label { text, at } = &ops[n - 1] else { panic!("label") };
    assert_eq!(text, "3×2 (6 pixels)");
    assert_eq!(*at, Point::new(20.0, 30.0 - LABEL_OFFSET_PX));
}

#[test]
fn single_cell_label_is_singular() {
    let rect = CellRect::from_corners(Cell::new(0, 0), Cell::new(0, 0));
    assert_eq!(selection_label(rect), "1×1 (1 pixel)");
}
