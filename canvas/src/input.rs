//! Input model: interaction modes, mouse buttons, and the gesture state machine.
//!
//! `Mode` captures what a drag means (moving the map or marking an area).
//! `InputState` is the gesture tracked between pointer-down and pointer-up.
//! A press stays unclassified until it either moves past the drag threshold
//! or is released; only then does it become a pan, a rectangle selection, or
//! a click.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::{CLICK_MAX_MS, DRAG_THRESHOLD_PX};
use crate::viewport::Point;

/// What dragging on the map does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Drag moves the map (default).
    #[default]
    Pan,
    /// Drag marks a rectangle of cells.
    Select,
}

impl Mode {
    /// CSS cursor shown while idle in this mode.
    #[must_use]
    pub fn idle_cursor(self) -> &'static str {
        match self {
            Self::Pan => "grab",
            Self::Select => "crosshair",
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Primary button is down but the gesture is not yet classified.
    Pressed {
        /// Screen position at pointer-down.
        start: Point,
        /// Timestamp of pointer-down, in milliseconds.
        start_ms: f64,
    },
    /// Dragging the map.
    Panning {
        /// Screen position of the previous pointer event, used to compute pan delta.
        last: Point,
    },
    /// Dragging out a selection rectangle.
    Selecting,
}

/// Whether the pointer has moved far enough from `start` to count as a drag.
#[must_use]
pub fn exceeds_drag_threshold(start: Point, current: Point) -> bool {
    (current.x - start.x).abs() > DRAG_THRESHOLD_PX || (current.y - start.y).abs() > DRAG_THRESHOLD_PX
}

/// Whether a press held for `elapsed_ms` is short enough to be a click.
#[must_use]
pub fn is_click_duration(elapsed_ms: f64) -> bool {
    elapsed_ms < CLICK_MAX_MS
}
