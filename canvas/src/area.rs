//! Ownership index and owned-area flood fill.
//!
//! [`OwnerIndex`] maps each owned cell to its owner's address (lowercased, so
//! lookups are case-insensitive). It is rebuilt whenever fresh pixel data
//! arrives and answers the two questions the map needs: which connected area
//! a click belongs to, and which selected cells a wallet does not own.

#[cfg(test)]
#[path = "area_test.rs"]
mod area_test;

use std::collections::{HashMap, HashSet, VecDeque};

use protocol::pixels::PixelRecord;

use crate::grid::Cell;

/// Coordinate → owner lookup.
#[derive(Debug, Clone, Default)]
pub struct OwnerIndex {
    owners: HashMap<Cell, String>,
}

impl OwnerIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(cell, owner)` pairs. Later pairs win on duplicates.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Cell, S)>,
        S: AsRef<str>,
    {
        let owners = pairs.into_iter().map(|(cell, owner)| (cell, owner.as_ref().to_lowercase())).collect();
        Self { owners }
    }

    /// Build from backend pixel records, skipping unowned pixels.
    #[must_use]
    pub fn from_pixels(pixels: &[PixelRecord]) -> Self {
        Self::from_pairs(
            pixels
                .iter()
                .filter_map(|p| p.owner_address().map(|owner| (Cell::new(p.x, p.y), owner))),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Lowercased owner of `cell`, if any.
    #[must_use]
    pub fn owner_of(&self, cell: Cell) -> Option<&str> {
        self.owners.get(&cell).map(String::as_str)
    }

    #[must_use]
    pub fn is_owned_by(&self, cell: Cell, owner: &str) -> bool {
        self.owner_of(cell).is_some_and(|o| o.eq_ignore_ascii_case(owner))
    }

    /// Every cell owned by `owner`, sorted.
    #[must_use]
    pub fn cells_owned_by(&self, owner: &str) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self
            .owners
            .iter()
            .filter(|(_, o)| o.eq_ignore_ascii_case(owner))
            .map(|(cell, _)| *cell)
            .collect();
        cells.sort_unstable();
        cells
    }

    /// The subset of `cells` not owned by `owner`, in input order.
    #[must_use]
    pub fn unowned_by(&self, cells: &[Cell], owner: &str) -> Vec<Cell> {
        cells.iter().copied().filter(|c| !self.is_owned_by(*c, owner)).collect()
    }

    /// Maximal 4-connected region of cells owned by `owner` containing `seed`.
    ///
    /// Returns an empty list when `seed` itself is not owned by `owner`.
    /// The result is sorted.
    #[must_use]
    pub fn flood_fill(&self, seed: Cell, owner: &str) -> Vec<Cell> {
        if !self.is_owned_by(seed, owner) {
            return Vec::new();
        }

        let mut visited = HashSet::from([seed]);
        let mut queue = VecDeque::from([seed]);
        let mut area = Vec::new();

        while let Some(cell) = queue.pop_front() {
            area.push(cell);
            for next in cell.neighbors() {
                if self.is_owned_by(next, owner) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        area.sort_unstable();
        area
    }
}
