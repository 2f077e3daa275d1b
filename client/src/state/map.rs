//! Map interaction state shared between the canvas host and the side panels.
//!
//! SYSTEM CONTEXT
//! ==============
//! The canvas engine owns viewport and gesture state. This model carries
//! only what other components react to: the interaction mode, the clicked
//! cell, the set of cells targeted for an image update, and reload requests.

#[cfg(test)]
#[path = "map_test.rs"]
mod map_test;

use canvas::grid::{Cell, CellRect};
use canvas::input::Mode;
use canvas::scene::selection_label;

/// Offer to update a whole owned region instead of one clicked cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AreaOffer {
    pub cell: Cell,
    pub area: Vec<Cell>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapState {
    pub mode: Mode,
    /// Cell whose details the info card shows.
    pub selected_cell: Option<Cell>,
    /// Cells an upload would write to.
    pub target_cells: Vec<Cell>,
    pub area_offer: Option<AreaOffer>,
    /// Rectangle drawn on the map around the targets, if any.
    pub outline: Option<CellRect>,
    /// Bumped to reload the map image and ownership.
    pub reload_seq: u64,
    /// Bumped to clear the drawn selection rectangle.
    pub clear_selection_seq: u64,
    pub load_error: Option<String>,
}

impl MapState {
    /// Flip between panning and area selection. Clears any targets.
    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = match self.mode {
            Mode::Pan => Mode::Select,
            Mode::Select => Mode::Pan,
        };
        self.target_cells.clear();
        self.area_offer = None;
        self.outline = None;
        self.mode
    }

    /// A single cell was clicked. `owned_area` is the flood-fill region when
    /// the cell belongs to the connected wallet.
    pub fn select_cell(&mut self, cell: Cell, owned_area: Option<Vec<Cell>>) {
        self.selected_cell = Some(cell);
        self.target_cells = vec![cell];
        self.outline = None;
        self.area_offer = owned_area
            .filter(|area| area.len() > 1)
            .map(|area| AreaOffer { cell, area });
    }

    /// A drag selection finished.
    pub fn select_area(&mut self, cells: Vec<Cell>) {
        self.selected_cell = cells.first().copied();
        self.outline = CellRect::bounding(&cells);
        self.target_cells = cells;
        self.area_offer = None;
    }

    /// Target the whole offered region.
    pub fn accept_area(&mut self) {
        if let Some(offer) = self.area_offer.take() {
            self.outline = CellRect::bounding(&offer.area);
            self.target_cells = offer.area;
        }
    }

    /// Keep only the clicked cell.
    pub fn decline_area(&mut self) {
        if let Some(offer) = self.area_offer.take() {
            self.target_cells = vec![offer.cell];
        }
    }

    pub fn clear_targets(&mut self) {
        self.target_cells.clear();
        self.area_offer = None;
        self.outline = None;
        self.clear_selection_seq += 1;
    }

    pub fn request_reload(&mut self) {
        self.reload_seq += 1;
    }

    /// Bounding rectangle of the targets.
    pub fn target_rect(&self) -> Option<CellRect> {
        CellRect::bounding(&self.target_cells)
    }

    /// `"3×2 (6 pixels)"` style summary of the targets.
    pub fn target_summary(&self) -> Option<String> {
        let rect = self.target_rect()?;
        if rect.cell_count() == self.target_cells.len() {
            Some(selection_label(rect))
        } else {
            let n = self.target_cells.len();
            Some(format!("{n} pixels in a {}×{} area", rect.width(), rect.height()))
        }
    }
}
