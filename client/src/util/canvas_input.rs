//! Pointer event mapping for the map canvas.

#[cfg(feature = "csr")]
use canvas::input::{Button as CanvasButton, WheelDelta};
#[cfg(feature = "csr")]
use canvas::viewport::Point as CanvasPoint;

#[cfg(feature = "csr")]
pub fn map_button(ev: &leptos::ev::PointerEvent) -> CanvasButton {
    CanvasButton::from_dom(ev.button())
}

#[cfg(feature = "csr")]
pub fn pointer_point(ev: &leptos::ev::PointerEvent) -> CanvasPoint {
    CanvasPoint::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

#[cfg(feature = "csr")]
pub fn wheel_point(ev: &leptos::ev::WheelEvent) -> CanvasPoint {
    CanvasPoint::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

#[cfg(feature = "csr")]
pub fn wheel_delta(ev: &leptos::ev::WheelEvent) -> WheelDelta {
    WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() }
}
