use super::*;

// =============================================================
// Mode
// =============================================================

#[test]
fn mode_default_is_pan() {
    assert_eq!(Mode::default(), Mode::Pan);
}

#[test]
fn mode_cursors_differ() {
    assert_eq!(Mode::Pan.idle_cursor(), "grab");
    assert_eq!(Mode::Select.idle_cursor(), "crosshair");
}

// =============================================================
// Button
// =============================================================

#[test]
fn button_from_dom_values() {
    assert_eq!(Button::from_dom(0), Button::Primary);
    assert_eq!(Button::from_dom(1), Button::Middle);
    assert_eq!(Button::from_dom(2), Button::Secondary);
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
}

// =============================================================
// Thresholds
// =============================================================

#[test]
fn five_pixels_is_not_a_drag() {
    let start = Point::new(100.0, 100.0);
    assert!(!exceeds_drag_threshold(start, Point::new(105.0, 95.0)));
}

#[test]
fn beyond_five_pixels_on_either_axis_is_a_drag() {
    let start = Point::new(100.0, 100.0);
    assert!(exceeds_drag_threshold(start, Point::new(105.5, 100.0)));
    assert!(exceeds_drag_threshold(start, Point::new(100.0, 94.0)));
}

#[test]
fn diagonal_within_threshold_per_axis_is_not_a_drag() {
    // 4.5 px on each axis is ~6.4 px euclidean but still under the per-axis limit.
    let start = Point::new(0.0, 0.0);
    assert!(!exceeds_drag_threshold(start, Point::new(4.5, 4.5)));
}

#[test]
fn click_duration_boundary() {
    assert!(is_click_duration(199.0));
    assert!(!is_click_duration(200.0));
}
