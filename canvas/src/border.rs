//! Ownership highlight borders.
//!
//! A highlighted region is outlined along its outer edge only: a cell side is
//! part of the border when the neighbour across it is unowned or belongs to a
//! different owner. Interior sides between same-owner cells are skipped.

#[cfg(test)]
#[path = "border_test.rs"]
mod border_test;

use crate::area::OwnerIndex;
use crate::grid::Cell;
use crate::viewport::{Point, Viewport};

/// One side of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

const SIDES: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

/// A border segment on one side of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub cell: Cell,
    pub side: Side,
}

impl Edge {
    /// Screen-space endpoints of this edge.
    #[must_use]
    pub fn screen_segment(&self, viewport: &Viewport) -> (Point, Point) {
        let Cell { x, y } = self.cell;
        let (a, b) = match self.side {
            Side::Top => (Cell::new(x, y), Cell::new(x + 1, y)),
            Side::Right => (Cell::new(x + 1, y), Cell::new(x + 1, y + 1)),
            Side::Bottom => (Cell::new(x, y + 1), Cell::new(x + 1, y + 1)),
            Side::Left => (Cell::new(x, y), Cell::new(x, y + 1)),
        };
        (viewport.cell_origin(a), viewport.cell_origin(b))
    }
}

/// Border edges of a single owned cell. Unowned cells have none.
#[must_use]
pub fn cell_edges(index: &OwnerIndex, cell: Cell) -> Vec<Edge> {
    let Some(owner) = index.owner_of(cell) else {
        return Vec::new();
    };
    cell.neighbors()
        .into_iter()
        .zip(SIDES)
        .filter(|(neighbor, _)| index.owner_of(*neighbor) != Some(owner))
        .map(|(_, side)| Edge { cell, side })
        .collect()
}

/// Border edges around every region owned by `owner`.
#[must_use]
pub fn owner_edges(index: &OwnerIndex, owner: &str) -> Vec<Edge> {
    index
        .cells_owned_by(owner)
        .into_iter()
        .flat_map(|cell| cell_edges(index, cell))
        .collect()
}
