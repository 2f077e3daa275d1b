use std::cell::RefCell;
use std::collections::HashSet;
use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use futures::executor::block_on;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use super::*;
use crate::consts::TILE_PX;
use crate::grid::CellRect;
use crate::tiles::tile_upload;

const ME: &str = "0x1111111111111111111111111111111111111111";
const OTHER: &str = "0x2222222222222222222222222222222222222222";

/// Records every call; fails for cells in `fail`.
#[derive(Default)]
struct FakeUpdater {
    calls: RefCell<Vec<(String, PixelUpdate)>>,
    fail: HashSet<Cell>,
}

impl CellUpdater for FakeUpdater {
    async fn update_cell(&self, address: &str, update: PixelUpdate) -> Result<(), String> {
        let cell = Cell::new(update.x, update.y);
        self.calls.borrow_mut().push((address.to_owned(), update));
        if self.fail.contains(&cell) { Err(format!("failed {},{}", cell.x, cell.y)) } else { Ok(()) }
    }
}

struct Observer {
    progress: Vec<(usize, usize, Cell)>,
    answer: bool,
    prompts: usize,
}

impl Observer {
    fn answering(answer: bool) -> Self {
        Self { progress: Vec::new(), answer, prompts: 0 }
    }
}

impl SubmitObserver for Observer {
    fn on_progress(&mut self, index: usize, total: usize, cell: Cell) {
        self.progress.push((index, total, cell));
    }

    fn continue_after_failure(&mut self, _cell: Cell, _error: &str) -> bool {
        self.prompts += 1;
        self.answer
    }
}

fn owned(cells: &[Cell], owner: &str) -> OwnerIndex {
    OwnerIndex::from_pairs(cells.iter().map(|c| (*c, owner)))
}

fn area_image(w: u32, h: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(w * TILE_PX, h * TILE_PX, |x, y| {
        Rgba([u8::try_from(x / TILE_PX).unwrap_or(0), u8::try_from(y / TILE_PX).unwrap_or(0), 7, 255])
    });
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img).write_to(&mut buf, ImageFormat::Png).expect("encode");
    buf.into_inner()
}

fn tiles_for(cells: &[Cell]) -> Vec<Tile> {
    cells.iter().map(|c| Tile { cell: *c, data_url: format!("data:{},{}", c.x, c.y) }).collect()
}

// =============================================================
// check_ownership
// =============================================================

#[test]
fn missing_wallet_is_blocked() {
    let cells = [Cell::new(0, 0)];
    assert_eq!(check_ownership(None, &cells, &owned(&cells, ME)), Err(UpdateError::WalletNotConnected));
}

#[test]
fn empty_selection_is_blocked() {
    assert_eq!(check_ownership(Some(ME), &[], &OwnerIndex::new()), Err(UpdateError::EmptySelection));
}

#[test]
fn partially_owned_selection_is_blocked_with_counts() {
    let mine = [Cell::new(0, 0), Cell::new(1, 0)];
    let selected = [Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)];
    let mut pairs: Vec<(Cell, &str)> = mine.iter().map(|c| (*c, ME)).collect();
    pairs.push((Cell::new(2, 0), OTHER));
    let err = check_ownership(Some(ME), &selected, &OwnerIndex::from_pairs(pairs)).expect_err("blocked");
    assert_eq!(err.to_string(), "You do not own 1 of the 3 selected pixels!");
}

#[test]
fn fully_owned_selection_passes_case_insensitively() {
    let cells = [Cell::new(0, 0)];
    let idx = owned(&cells, &ME.to_uppercase().replace("0X", "0x"));
    assert_eq!(check_ownership(Some(ME), &cells, &idx), Ok(ME));
}

// =============================================================
// submit_tiles
// =============================================================

#[test]
fn three_by_two_area_makes_six_single_cell_calls() {
    let cells = CellRect::from_corners(Cell::new(10, 10), Cell::new(12, 11)).cells();
    let address = check_ownership(Some(ME), &cells, &owned(&cells, ME)).expect("owned");
    let tiles = tile_upload(&area_image(3, 2), &cells).expect("tiles");

    let updater = FakeUpdater::default();
    let mut observer = Observer::answering(true);
    let report = block_on(submit_tiles(&updater, address, tiles, &mut observer));

    assert!(report.is_complete_success());
    let calls = updater.calls.borrow();
    assert_eq!(calls.len(), 6);
    for (addr, update) in calls.iter() {
        assert_eq!(addr, ME);
        let b64 = update.image.strip_prefix("data:image/png;base64,").expect("png data url");
        let tile = image::load_from_memory(&STANDARD.decode(b64).expect("b64")).expect("png").to_rgba8();
        assert_eq!(tile.dimensions(), (TILE_PX, TILE_PX));
        let expected = Rgba([
            u8::try_from(update.x - 10).expect("x"),
            u8::try_from(update.y - 10).expect("y"),
            7,
            255,
        ]);
        assert!(tile.pixels().all(|p| *p == expected));
    }
    let called: HashSet<(i32, i32)> = calls.iter().map(|(_, u)| (u.x, u.y)).collect();
    assert_eq!(called.len(), 6);
}

#[test]
fn progress_reports_each_cell_in_order() {
    let cells = vec![Cell::new(0, 0), Cell::new(1, 0)];
    let updater = FakeUpdater::default();
    let mut observer = Observer::answering(true);
    block_on(submit_tiles(&updater, ME, tiles_for(&cells), &mut observer));
    assert_eq!(observer.progress, vec![(0, 2, Cell::new(0, 0)), (1, 2, Cell::new(1, 0))]);
}

#[test]
fn failure_then_continue_attempts_remaining_cells() {
    let cells = vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)];
    let updater = FakeUpdater { fail: HashSet::from([Cell::new(1, 0)]), ..FakeUpdater::default() };
    let mut observer = Observer::answering(true);
    let report = block_on(submit_tiles(&updater, ME, tiles_for(&cells), &mut observer));
    assert_eq!(report.succeeded, vec![Cell::new(0, 0), Cell::new(2, 0)]);
    assert_eq!(report.failed, vec![CellFailure { cell: Cell::new(1, 0), error: "failed 1,0".to_owned() }]);
    assert!(report.skipped.is_empty());
    assert_eq!(observer.prompts, 1);
}

#[test]
fn failure_then_stop_skips_remaining_cells() {
    let cells = vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0), Cell::new(3, 0)];
    let updater = FakeUpdater { fail: HashSet::from([Cell::new(1, 0)]), ..FakeUpdater::default() };
    let mut observer = Observer::answering(false);
    let report = block_on(submit_tiles(&updater, ME, tiles_for(&cells), &mut observer));
    assert_eq!(updater.calls.borrow().len(), 2);
    assert_eq!(report.skipped, vec![Cell::new(2, 0), Cell::new(3, 0)]);
    assert_eq!(report.summary(), "Updated 1 pixel(s), 1 failed, 2 skipped");
}

#[test]
fn summary_for_clean_run() {
    let report = UpdateReport { succeeded: vec![Cell::new(0, 0)], ..UpdateReport::default() };
    assert_eq!(report.summary(), "Updated 1 pixel(s)");
}
