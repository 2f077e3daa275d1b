use super::*;

fn c(x: i32, y: i32) -> Cell {
    Cell::new(x, y)
}

#[test]
fn default_mode_is_pan() {
    assert_eq!(MapState::default().mode, Mode::Pan);
}

#[test]
fn toggle_mode_flips_and_clears_targets() {
    let mut state = MapState::default();
    state.select_cell(c(1, 1), None);
    assert_eq!(state.toggle_mode(), Mode::Select);
    assert!(state.target_cells.is_empty());
    assert_eq!(state.toggle_mode(), Mode::Pan);
}

#[test]
fn clicking_a_cell_targets_it() {
    let mut state = MapState::default();
    state.select_cell(c(4, 5), None);
    assert_eq!(state.selected_cell, Some(c(4, 5)));
    assert_eq!(state.target_cells, vec![c(4, 5)]);
    assert_eq!(state.area_offer, None);
}

#[test]
fn single_cell_region_makes_no_offer() {
    let mut state = MapState::default();
    state.select_cell(c(4, 5), Some(vec![c(4, 5)]));
    assert_eq!(state.area_offer, None);
}

#[test]
fn owned_region_is_offered_and_can_be_accepted() {
    let mut state = MapState::default();
    let area = vec![c(0, 0), c(0, 1), c(1, 0)];
    state.select_cell(c(0, 0), Some(area.clone()));
    assert_eq!(state.area_offer.as_ref().map(|o| o.area.len()), Some(3));
    state.accept_area();
    assert_eq!(state.target_cells, area);
    assert_eq!(state.area_offer, None);
}

#[test]
fn declining_keeps_the_clicked_cell() {
    let mut state = MapState::default();
    state.select_cell(c(0, 0), Some(vec![c(0, 0), c(1, 0)]));
    state.decline_area();
    assert_eq!(state.target_cells, vec![c(0, 0)]);
}

#[test]
fn area_selection_targets_every_cell() {
    let mut state = MapState::default();
    let cells = CellRect::from_corners(c(2, 3), c(4, 4)).cells();
    state.select_area(cells.clone());
    assert_eq!(state.target_cells, cells);
    assert_eq!(state.selected_cell, Some(c(2, 3)));
    assert_eq!(state.target_summary().as_deref(), Some("3×2 (6 pixels)"));
}

#[test]
fn sparse_region_summary_counts_cells() {
    let mut state = MapState::default();
    state.select_cell(c(0, 0), Some(vec![c(0, 0), c(0, 1), c(1, 0)]));
    state.accept_area();
    assert_eq!(state.target_summary().as_deref(), Some("3 pixels in a 2×2 area"));
}

#[test]
fn clear_targets_bumps_selection_seq() {
    let mut state = MapState::default();
    state.select_area(vec![c(0, 0)]);
    state.clear_targets();
    assert!(state.target_cells.is_empty());
    assert_eq!(state.clear_selection_seq, 1);
    assert_eq!(state.target_summary(), None);
}

#[test]
fn reload_requests_are_counted() {
    let mut state = MapState::default();
    state.request_reload();
    state.request_reload();
    assert_eq!(state.reload_seq, 2);
}

#[test]
fn accepting_area_outlines_its_bounding_box() {
    let mut state = MapState::default();
    state.select_cell(c(1, 1), Some(vec![c(1, 1), c(2, 1), c(2, 2)]));
    assert_eq!(state.outline, None);
    state.accept_area();
    assert_eq!(state.outline, Some(CellRect::from_corners(c(1, 1), c(2, 2))));
}

#[test]
fn new_click_or_clear_drops_the_outline() {
    let mut state = MapState::default();
    state.select_area(vec![c(0, 0), c(1, 0)]);
    assert_eq!(state.outline, Some(CellRect::from_corners(c(0, 0), c(1, 0))));
    state.select_cell(c(5, 5), None);
    assert_eq!(state.outline, None);

    state.select_area(vec![c(0, 0)]);
    state.clear_targets();
    assert_eq!(state.outline, None);
}
