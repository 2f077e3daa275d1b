use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::area::OwnerIndex;
use crate::border::{Edge, owner_edges};
use crate::consts::{ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use crate::grid::{Cell, CellRect, SelectionRect};
use crate::input::{Button, InputState, Mode, WheelDelta, exceeds_drag_threshold, is_click_duration};
use crate::render;
use crate::scene::{self, DrawOp, SceneInput};
use crate::viewport::{Point, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A click landed on an on-map cell.
    CellClicked(Cell),
    /// A drag selection finished; every covered cell in row-major order.
    AreaSelected(Vec<Cell>),
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    pub viewport: Viewport,
    pub input: InputState,
    pub mode: Mode,
    pub selection: Option<SelectionRect>,
    pub owners: OwnerIndex,
    /// Lowercased address whose regions are outlined.
    pub highlight_owner: Option<String>,
    highlight_edges: Vec<Edge>,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub has_image: bool,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Replace the ownership index and recompute highlight borders.
    pub fn set_owners(&mut self, owners: OwnerIndex) {
        self.owners = owners;
        self.refresh_highlight();
    }

    /// Outline regions owned by `owner`, or nothing for `None`.
    pub fn set_highlight_owner(&mut self, owner: Option<&str>) {
        self.highlight_owner = owner.map(str::to_lowercase);
        self.refresh_highlight();
    }

    fn refresh_highlight(&mut self) {
        self.highlight_edges = match &self.highlight_owner {
            Some(owner) => owner_edges(&self.owners, owner),
            None => Vec::new(),
        };
    }

    /// Switch interaction mode. Any selection and gesture in progress is dropped.
    pub fn set_mode(&mut self, mode: Mode) -> Vec<Action> {
        self.mode = mode;
        self.selection = None;
        self.input = InputState::Idle;
        vec![Action::SetCursor(mode.idle_cursor().to_owned()), Action::RenderNeeded]
    }

    pub fn clear_selection(&mut self) -> Vec<Action> {
        if self.selection.take().is_some() { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    /// Select an explicit set of cells (e.g. a flood-filled area) as a rectangle.
    pub fn select_rect(&mut self, rect: CellRect) {
        self.selection = Some(SelectionRect { start: rect.origin(), end: Cell::new(rect.max_x, rect.max_y) });
    }

    // --- Viewport ---

    /// Update canvas dimensions in CSS pixels.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Center the grid in the current canvas.
    pub fn center_grid(&mut self) {
        self.viewport.center_in(self.viewport_width, self.viewport_height);
    }

    /// Whether a gesture is in progress. Resizes don't recenter mid-drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.input, InputState::Panning { .. } | InputState::Selecting)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, now_ms: f64) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        self.input = InputState::Pressed { start: screen_pt, start_ms: now_ms };
        match self.mode {
            Mode::Pan => Vec::new(),
            Mode::Select => {
                let cell = self.viewport.to_cell(screen_pt).clamped();
                self.selection = Some(SelectionRect::at(cell));
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Whether `screen_pt` lies outside a sized canvas.
    #[must_use]
    pub fn is_outside_canvas(&self, screen_pt: Point) -> bool {
        self.viewport_width > 0.0
            && self.viewport_height > 0.0
            && (screen_pt.x < 0.0
                || screen_pt.y < 0.0
                || screen_pt.x >= self.viewport_width
                || screen_pt.y >= self.viewport_height)
    }

    /// Pointer moved. With pointer capture the browser keeps delivering moves
    /// after the pointer exits the canvas and never fires `pointerleave`, so a
    /// move outside a sized canvas is handled as leaving it.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        if self.input != InputState::Idle && self.is_outside_canvas(screen_pt) {
            return self.on_pointer_leave();
        }
        match self.input {
            InputState::Idle => Vec::new(),
            InputState::Pressed { start, .. } => {
                if !exceeds_drag_threshold(start, screen_pt) {
                    return Vec::new();
                }
                match self.mode {
                    Mode::Pan => {
                        self.viewport.pan_by(screen_pt.x - start.x, screen_pt.y - start.y);
                        self.input = InputState::Panning { last: screen_pt };
                        vec![Action::SetCursor("grabbing".to_owned()), Action::RenderNeeded]
                    }
                    Mode::Select => {
                        self.input = InputState::Selecting;
                        self.extend_selection(screen_pt);
                        vec![Action::RenderNeeded]
                    }
                }
            }
            InputState::Panning { last } => {
                self.viewport.pan_by(screen_pt.x - last.x, screen_pt.y - last.y);
                self.input = InputState::Panning { last: screen_pt };
                vec![Action::RenderNeeded]
            }
            InputState::Selecting => {
                if self.extend_selection(screen_pt) { vec![Action::RenderNeeded] } else { Vec::new() }
            }
        }
    }

    /// Move the selection's end cell under the pointer. Returns whether it changed.
    fn extend_selection(&mut self, screen_pt: Point) -> bool {
        let cell = self.viewport.to_cell(screen_pt).clamped();
        match &mut self.selection {
            Some(sel) if sel.end != cell => {
                sel.end = cell;
                true
            }
            Some(_) => false,
            None => {
                self.selection = Some(SelectionRect::at(cell));
                true
            }
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, now_ms: f64) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Pressed { start_ms, .. } => {
                let mut actions = self.discard_pending_selection();
                let cell = self.viewport.to_cell(screen_pt);
                if is_click_duration(now_ms - start_ms) && cell.in_bounds() {
                    actions.insert(0, Action::CellClicked(cell));
                }
                actions
            }
            InputState::Panning { .. } => {
                vec![Action::SetCursor(self.mode.idle_cursor().to_owned()), Action::RenderNeeded]
            }
            InputState::Selecting => match self.selection {
                Some(sel) => vec![Action::AreaSelected(sel.normalized().cells()), Action::RenderNeeded],
                None => Vec::new(),
            },
        }
    }

    /// Pointer left the canvas: an unfinished rectangle is abandoned.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Pressed { .. } => self.discard_pending_selection(),
            InputState::Panning { .. } => vec![Action::SetCursor(self.mode.idle_cursor().to_owned())],
            InputState::Selecting => {
                self.selection = None;
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Drop the provisional 1×1 rectangle created at pointer-down in select mode.
    fn discard_pending_selection(&mut self) -> Vec<Action> {
        if self.mode == Mode::Select && self.selection.take().is_some() {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        let factor = if delta.dy < 0.0 { ZOOM_IN_FACTOR } else { ZOOM_OUT_FACTOR };
        self.viewport.zoom_at(screen_pt, factor);
        vec![Action::RenderNeeded]
    }

    // --- Queries ---

    /// Owned area around `cell` for `owner` (empty if `cell` isn't theirs).
    #[must_use]
    pub fn owned_area(&self, cell: Cell, owner: &str) -> Vec<Cell> {
        self.owners.flood_fill(cell, owner)
    }

    #[must_use]
    pub fn selection_rect(&self) -> Option<CellRect> {
        self.selection.as_ref().map(SelectionRect::normalized)
    }

    #[must_use]
    pub fn highlight_edges(&self) -> &[Edge] {
        &self.highlight_edges
    }

    /// Display list for the current state.
    #[must_use]
    pub fn scene(&self) -> Vec<DrawOp> {
        scene::build(&SceneInput {
            viewport: &self.viewport,
            width: self.viewport_width,
            height: self.viewport_height,
            has_image: self.has_image,
            highlight: &self.highlight_edges,
            selection: self.selection_rect(),
        })
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    image: Option<HtmlImageElement>,
    dpr: f64,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, image: None, dpr: 1.0, core: EngineCore::new() }
    }

    /// Install a freshly loaded map image. The first image centers the grid.
    pub fn set_image(&mut self, image: HtmlImageElement) {
        let first = self.image.is_none();
        self.image = Some(image);
        self.core.has_image = true;
        if first {
            self.core.center_grid();
        }
    }

    /// Resize the backing store to the element's CSS size times `dpr`.
    ///
    /// A real size change recenters the grid unless a drag is in progress.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        let resized = (width_css - self.core.viewport_width).abs() > f64::EPSILON
            || (height_css - self.core.viewport_height).abs() > f64::EPSILON;
        self.dpr = dpr;
        self.canvas.set_width((width_css * dpr).round() as u32);
        self.canvas.set_height((height_css * dpr).round() as u32);
        self.core.set_viewport_size(width_css, height_css);
        if resized && self.core.has_image && !self.core.is_dragging() {
            self.core.center_grid();
        }
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let Some(ctx) = self.canvas.get_context("2d")? else {
            return Err(JsValue::from_str("2d context unavailable"));
        };
        let ctx = ctx.dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(&ctx, &self.core.scene(), self.image.as_ref(), self.dpr)
    }
}
