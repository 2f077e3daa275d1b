//! Shared numeric constants for the canvas crate.

// ── Grid ────────────────────────────────────────────────────────

/// Number of cells along each side of the square map.
pub const GRID_SIZE: i32 = 100;

/// Side length, in image pixels, of the tile stored for one cell.
pub const TILE_PX: u32 = 10;

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest on-screen cell size in CSS pixels.
pub const MIN_CELL_PX: f64 = 1.0;

/// Largest on-screen cell size in CSS pixels.
pub const MAX_CELL_PX: f64 = 100.0;

/// Cell size at startup.
pub const DEFAULT_CELL_PX: f64 = 10.0;

/// Scale applied per wheel notch towards the user (zoom in).
pub const ZOOM_IN_FACTOR: f64 = 1.1;

/// Scale applied per wheel notch away from the user (zoom out).
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

// ── Gestures ────────────────────────────────────────────────────

/// Movement along either axis beyond which a press becomes a drag.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// A press released sooner than this without dragging is a click.
pub const CLICK_MAX_MS: f64 = 200.0;

// ── Rendering ───────────────────────────────────────────────────

/// Grid lines are only drawn when cells are larger than this.
pub const GRID_LINE_MIN_CELL_PX: f64 = 5.0;

pub const GRID_LINE_COLOR: &str = "rgba(0, 0, 0, 0.2)";
pub const HIGHLIGHT_COLOR: &str = "#facc15";
pub const HIGHLIGHT_LINE_WIDTH: f64 = 2.0;
pub const SELECTION_FILL: &str = "rgba(59, 130, 246, 0.25)";
pub const SELECTION_STROKE: &str = "#2563eb";
pub const SELECTION_DASH_PX: f64 = 6.0;
pub const LABEL_FONT: &str = "12px sans-serif";
pub const LABEL_COLOR: &str = "#1e3a8a";
pub const LABEL_BACKGROUND: &str = "rgba(255, 255, 255, 0.85)";

/// Gap between the selection rectangle and its label, in CSS pixels.
pub const LABEL_OFFSET_PX: f64 = 4.0;

// ── Upload ──────────────────────────────────────────────────────

/// Largest accepted upload, in bytes (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// MIME types accepted for area uploads.
pub const ACCEPTED_IMAGE_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/gif", "image/webp"];
