//! Details of the most recently clicked cell.
//!
//! Lookups are asynchronous and the user can click faster than the backend
//! answers. Each lookup takes a sequence number from [`PixelInfoState::begin`];
//! a result is applied only if its number is still the latest.

#[cfg(test)]
#[path = "pixel_info_test.rs"]
mod pixel_info_test;

use canvas::grid::Cell;
use protocol::pixels::PixelRecord;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PixelInfoState {
    seq: u64,
    pub cell: Option<Cell>,
    pub loading: bool,
    /// `None` after loading means the backend has no record (404).
    pub pixel: Option<PixelRecord>,
    pub error: Option<String>,
}

impl PixelInfoState {
    /// Start a lookup for `cell`; returns the ticket to finish it with.
    pub fn begin(&mut self, cell: Cell) -> u64 {
        self.seq += 1;
        self.cell = Some(cell);
        self.loading = true;
        self.pixel = None;
        self.error = None;
        self.seq
    }

    /// Apply a lookup result. Returns `false` if a newer lookup superseded it.
    pub fn finish(&mut self, ticket: u64, result: Result<Option<PixelRecord>, String>) -> bool {
        if ticket != self.seq {
            return false;
        }
        self.loading = false;
        match result {
            Ok(pixel) => self.pixel = pixel,
            Err(e) => self.error = Some(e),
        }
        true
    }

    pub fn title(&self) -> String {
        match self.cell {
            Some(cell) => format!("Pixel ({}, {})", cell.x, cell.y),
            None => "Pixel Info".to_owned(),
        }
    }

    pub fn owner(&self) -> Option<&str> {
        self.pixel.as_ref().and_then(|p| p.owner_address())
    }

    /// Metadata pretty-printed, when present and non-empty.
    pub fn metadata_json(&self) -> Option<String> {
        let metadata = self.pixel.as_ref()?.metadata.as_ref()?;
        let empty = match metadata {
            serde_json::Value::Null => true,
            serde_json::Value::Object(map) => map.is_empty(),
            _ => false,
        };
        if empty {
            return None;
        }
        serde_json::to_string_pretty(metadata).ok()
    }
}

/// Availability line shown to a connected wallet that does not own the cell.
pub fn availability_text(owner: Option<&str>) -> &'static str {
    if owner.is_some() {
        "This pixel is owned by someone else"
    } else {
        "This pixel is available for purchase"
    }
}

/// Colour the update form starts with.
pub const DEFAULT_PIXEL_COLOR: &str = "#ff0000";

/// Solid-colour update form for a pixel the wallet owns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorForm {
    /// Cell the form is open for; `None` when closed.
    pub cell: Option<Cell>,
    pub color: String,
    pub busy: bool,
    pub error: Option<String>,
}

impl Default for ColorForm {
    fn default() -> Self {
        Self { cell: None, color: DEFAULT_PIXEL_COLOR.to_owned(), busy: false, error: None }
    }
}

impl ColorForm {
    pub fn open(&mut self, cell: Cell) {
        if !self.busy {
            *self = Self { cell: Some(cell), ..Self::default() };
        }
    }

    /// Close unless a submission is in flight.
    pub fn close(&mut self) {
        if !self.busy {
            self.cell = None;
            self.error = None;
        }
    }

    pub fn is_open_for(&self, cell: Option<Cell>) -> bool {
        self.cell.is_some() && self.cell == cell
    }

    pub fn set_color(&mut self, color: String) {
        self.color = color;
        self.error = None;
    }

    /// Start submitting. Returns the cell and colour to send, or `None` if
    /// the form is closed or already busy.
    pub fn begin(&mut self) -> Option<(Cell, String)> {
        let cell = self.cell.filter(|_| !self.busy)?;
        self.busy = true;
        self.error = None;
        Some((cell, self.color.clone()))
    }

    pub fn fail(&mut self, error: String) {
        self.busy = false;
        self.error = Some(error);
    }

    pub fn succeed(&mut self) {
        self.busy = false;
        self.close();
    }
}
