//! `pixelmap upload`: write an image over owned cells, one request per cell.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use std::path::{Path, PathBuf};

use canvas::area::OwnerIndex;
use canvas::grid::{Cell, CellRect};
use canvas::tiles::{tile_upload, validate_upload};
use canvas::update::{SubmitObserver, check_ownership, submit_tiles};
use clap::{ArgGroup, Args};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::{CliError, describe_cells, parse_cell};

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["rect", "cell", "fill"])))]
pub struct UploadArgs {
    /// Image file (PNG, JPEG, GIF or WebP).
    pub image: PathBuf,

    /// Wallet address that owns the target cells.
    #[arg(long, env = "PIXELMAP_ADDRESS")]
    pub address: String,

    /// Rectangle `x,y,width,height`.
    #[arg(long, value_parser = parse_rect)]
    pub rect: Option<CellRect>,

    /// A single cell `x,y`.
    #[arg(long, value_parser = parse_cell)]
    pub cell: Option<Cell>,

    /// The owned area containing `x,y`.
    #[arg(long, value_parser = parse_cell)]
    pub fill: Option<Cell>,

    /// Continue with the remaining cells after a failed one.
    #[arg(long, default_value_t = false)]
    pub keep_going: bool,

    /// Check ownership and cut tiles without sending anything.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

/// Logs progress and applies the `--keep-going` policy.
struct CliObserver {
    keep_going: bool,
}

impl SubmitObserver for CliObserver {
    fn on_progress(&mut self, index: usize, total: usize, cell: Cell) {
        info!(x = cell.x, y = cell.y, "updating pixel {} of {total}", index + 1);
    }

    fn continue_after_failure(&mut self, cell: Cell, error: &str) -> bool {
        warn!(x = cell.x, y = cell.y, %error, keep_going = self.keep_going, "pixel update failed");
        self.keep_going
    }
}

pub async fn run_upload(api: &ApiClient, args: UploadArgs) -> Result<(), CliError> {
    let mime = mime_for_path(&args.image)?;
    let bytes = tokio::fs::read(&args.image).await?;
    validate_upload(mime, bytes.len() as u64)?;

    let owners = OwnerIndex::from_pixels(&api.pixels().await?);
    let cells = target_cells(&args, &owners);
    let address = check_ownership(Some(&args.address), &cells, &owners)?;
    info!(cells = %describe_cells(&cells), "ownership confirmed");

    let tiles = tile_upload(&bytes, &cells)?;
    if args.dry_run {
        info!(tiles = tiles.len(), "dry run; nothing sent");
        return Ok(());
    }

    let mut observer = CliObserver { keep_going: args.keep_going };
    let report = submit_tiles(api, address, tiles, &mut observer).await;
    if report.is_complete_success() {
        info!(updated = report.succeeded.len(), "upload complete");
        Ok(())
    } else {
        Err(CliError::Incomplete(report.summary()))
    }
}

/// Cells selected by the target flags.
fn target_cells(args: &UploadArgs, owners: &OwnerIndex) -> Vec<Cell> {
    if let Some(rect) = args.rect {
        return rect.cells();
    }
    if let Some(cell) = args.cell {
        return vec![cell];
    }
    args.fill
        .map(|seed| owners.flood_fill(seed, &args.address))
        .unwrap_or_default()
}

/// Parse `x,y,width,height` into an in-bounds rectangle.
fn parse_rect(value: &str) -> Result<CellRect, String> {
    let parts = value
        .split(',')
        .map(|p| p.trim().parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("bad number in `{value}`: {e}"))?;
    let [x, y, w, h] = parts[..] else {
        return Err(format!("expected x,y,width,height but got `{value}`"));
    };
    if w < 1 || h < 1 {
        return Err(format!("empty rectangle `{value}`"));
    }
    let first = Cell::new(x, y);
    let last = Cell::new(x.saturating_add(w - 1), y.saturating_add(h - 1));
    for cell in [first, last] {
        if !cell.in_bounds() {
            return Err(CliError::OutOfBounds { x: cell.x, y: cell.y }.to_string());
        }
    }
    Ok(CellRect::from_corners(first, last))
}

/// MIME type from the file extension.
fn mime_for_path(path: &Path) -> Result<&'static str, CliError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "gif" => Ok("image/gif"),
        "webp" => Ok("image/webp"),
        _ => Err(CliError::UnknownImageType(path.display().to_string())),
    }
}
