use super::*;

// =============================================================
// mode_toggle_label
// =============================================================

#[test]
fn toggle_names_the_other_mode() {
    assert_eq!(mode_toggle_label(Mode::Pan), "Select Area");
    assert_eq!(mode_toggle_label(Mode::Select), "Pan");
}

#[test]
fn toggle_label_follows_state_toggle() {
    let mut map = MapState::default();
    assert_eq!(mode_toggle_label(map.mode), "Select Area");
    let next = map.toggle_mode();
    assert_eq!(mode_toggle_label(next), "Pan");
}

// =============================================================
// mode_hint
// =============================================================

#[test]
fn hints_differ_per_mode() {
    assert_ne!(mode_hint(Mode::Pan), mode_hint(Mode::Select));
    assert!(mode_hint(Mode::Select).contains("select"));
}
