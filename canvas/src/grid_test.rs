use super::*;

// =============================================================================
// Cell
// =============================================================================

#[test]
fn corners_are_in_bounds() {
    assert!(Cell::new(0, 0).in_bounds());
    assert!(Cell::new(GRID_SIZE - 1, GRID_SIZE - 1).in_bounds());
}

#[test]
fn outside_cells_are_out_of_bounds() {
    assert!(!Cell::new(-1, 0).in_bounds());
    assert!(!Cell::new(0, GRID_SIZE).in_bounds());
}

#[test]
fn clamped_snaps_to_nearest_edge() {
    assert_eq!(Cell::new(-5, 250).clamped(), Cell::new(0, GRID_SIZE - 1));
    assert_eq!(Cell::new(4, 7).clamped(), Cell::new(4, 7));
}

#[test]
fn neighbors_are_four_connected() {
    let n = Cell::new(5, 5).neighbors();
    assert_eq!(n, [Cell::new(5, 4), Cell::new(6, 5), Cell::new(5, 6), Cell::new(4, 5)]);
}

// =============================================================================
// CellRect
// =============================================================================

#[test]
fn from_corners_normalizes_drag_direction() {
    let rect = CellRect::from_corners(Cell::new(7, 2), Cell::new(3, 9));
    assert_eq!(rect, CellRect { min_x: 3, min_y: 2, max_x: 7, max_y: 9 });
}

#[test]
fn single_cell_rect_has_size_one() {
    let rect = SelectionRect::at(Cell::new(4, 4)).normalized();
    assert_eq!((rect.width(), rect.height(), rect.cell_count()), (1, 1, 1));
}

#[test]
fn cells_are_row_major() {
    let rect = CellRect::from_corners(Cell::new(0, 0), Cell::new(2, 1));
    assert_eq!(
        rect.cells(),
        vec![
            Cell::new(0, 0),
            Cell::new(1, 0),
            Cell::new(2, 0),
            Cell::new(0, 1),
            Cell::new(1, 1),
            Cell::new(2, 1),
        ]
    );
    assert_eq!(rect.cell_count(), 6);
}

#[test]
fn bounding_of_scattered_cells() {
    let rect = CellRect::bounding(&[Cell::new(5, 1), Cell::new(2, 8), Cell::new(3, 3)]).expect("rect");
    assert_eq!(rect, CellRect { min_x: 2, min_y: 1, max_x: 5, max_y: 8 });
    assert_eq!(rect.origin(), Cell::new(2, 1));
}

#[test]
fn bounding_of_nothing_is_none() {
    assert!(CellRect::bounding(&[]).is_none());
}

#[test]
fn contains_is_inclusive() {
    let rect = CellRect::from_corners(Cell::new(1, 1), Cell::new(3, 3));
    assert!(rect.contains(Cell::new(3, 3)));
    assert!(!rect.contains(Cell::new(4, 3)));
}
