//! Area update orchestration.
//!
//! Updating an area means: confirm a wallet is connected, confirm it owns
//! every selected cell against freshly fetched ownership, then submit one
//! update per cell. Submission is sequential so progress can be reported per
//! cell, and a failed cell pauses the run until the caller decides whether to
//! continue with the rest.
//!
//! Transport and prompting are behind traits so the browser (gloo-net and
//! `window.confirm`) and the CLI (reqwest and a flag) share this logic.

#[cfg(test)]
#[path = "update_test.rs"]
mod update_test;

use std::future::Future;

use protocol::pixels::PixelUpdate;
use serde::Serialize;

use crate::area::OwnerIndex;
use crate::grid::Cell;
use crate::tiles::Tile;

/// Why an area update was blocked before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateError {
    #[error("Please connect your wallet")]
    WalletNotConnected,
    #[error("No pixels selected")]
    EmptySelection,
    #[error("You do not own {unowned} of the {total} selected pixels!")]
    NotOwner { unowned: usize, total: usize },
}

/// Check that `address` is present and owns every cell.
///
/// Returns the address on success so callers can carry it forward.
///
/// # Errors
///
/// See [`UpdateError`].
pub fn check_ownership<'a>(address: Option<&'a str>, cells: &[Cell], owners: &OwnerIndex) -> Result<&'a str, UpdateError> {
    let address = address.ok_or(UpdateError::WalletNotConnected)?;
    if cells.is_empty() {
        return Err(UpdateError::EmptySelection);
    }
    let unowned = owners.unowned_by(cells, address).len();
    if unowned > 0 {
        return Err(UpdateError::NotOwner { unowned, total: cells.len() });
    }
    Ok(address)
}

/// Sends one cell's update to the backend.
pub trait CellUpdater {
    /// Submit a single pixel update on behalf of `address`.
    fn update_cell(&self, address: &str, update: PixelUpdate) -> impl Future<Output = Result<(), String>>;
}

/// Callbacks for progress reporting and failure handling.
pub trait SubmitObserver {
    /// Called before each cell is submitted. `index` is zero-based.
    fn on_progress(&mut self, index: usize, total: usize, cell: Cell);

    /// Called after a cell fails. Return `false` to skip the remaining cells.
    fn continue_after_failure(&mut self, cell: Cell, error: &str) -> bool;
}

/// A cell that failed to update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellFailure {
    pub cell: Cell,
    pub error: String,
}

/// Outcome of a multi-cell submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateReport {
    pub succeeded: Vec<Cell>,
    pub failed: Vec<CellFailure>,
    /// Cells never attempted because the run was stopped after a failure.
    pub skipped: Vec<Cell>,
}

impl UpdateReport {
    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }

    /// One-line summary for status displays.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut text = format!("Updated {} pixel(s)", self.succeeded.len());
        if !self.failed.is_empty() {
            text.push_str(&format!(", {} failed", self.failed.len()));
        }
        if !self.skipped.is_empty() {
            text.push_str(&format!(", {} skipped", self.skipped.len()));
        }
        text
    }
}

/// Submit every tile, one call per cell, in order.
pub async fn submit_tiles<U, O>(updater: &U, address: &str, tiles: Vec<Tile>, observer: &mut O) -> UpdateReport
where
    U: CellUpdater,
    O: SubmitObserver,
{
    let total = tiles.len();
    let mut report = UpdateReport::default();
    let mut remaining = tiles.into_iter().enumerate();

    while let Some((index, tile)) = remaining.next() {
        let cell = tile.cell;
        observer.on_progress(index, total, cell);
        let update = PixelUpdate { x: cell.x, y: cell.y, image: tile.data_url };
        match updater.update_cell(address, update).await {
            Ok(()) => report.succeeded.push(cell),
            Err(error) => {
                let keep_going = observer.continue_after_failure(cell, &error);
                report.failed.push(CellFailure { cell, error });
                if !keep_going {
                    report.skipped.extend(remaining.by_ref().map(|(_, t)| t.cell));
                }
            }
        }
    }

    report
}
