use super::*;

const A: &str = "0xAAAA000000000000000000000000000000000001";
const B: &str = "0xBBBB000000000000000000000000000000000002";

fn index(pairs: &[((i32, i32), &str)]) -> OwnerIndex {
    OwnerIndex::from_pairs(pairs.iter().map(|((x, y), o)| (Cell::new(*x, *y), *o)))
}

// =============================================================
// OwnerIndex
// =============================================================

#[test]
fn owner_lookup_is_case_insensitive() {
    let idx = index(&[((1, 1), A)]);
    assert!(idx.is_owned_by(Cell::new(1, 1), &A.to_lowercase()));
    assert!(idx.is_owned_by(Cell::new(1, 1), &A.to_uppercase().replace("0X", "0x")));
    assert_eq!(idx.owner_of(Cell::new(1, 1)), Some(A.to_lowercase().as_str()));
}

#[test]
fn from_pixels_skips_unowned_records() {
    let pixels: Vec<PixelRecord> = pixel_records(&[(0, 0, Some(A)), (1, 0, None)]);
    let idx = OwnerIndex::from_pixels(&pixels);
    assert_eq!(idx.len(), 1);
    assert!(idx.owner_of(Cell::new(1, 0)).is_none());
}

#[test]
fn cells_owned_by_is_sorted() {
    let idx = index(&[((3, 0), A), ((0, 0), A), ((1, 0), B)]);
    assert_eq!(idx.cells_owned_by(A), vec![Cell::new(0, 0), Cell::new(3, 0)]);
}

#[test]
fn unowned_by_reports_foreign_and_empty_cells() {
    let idx = index(&[((0, 0), A), ((1, 0), B)]);
    let cells = [Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)];
    assert_eq!(idx.unowned_by(&cells, A), vec![Cell::new(1, 0), Cell::new(2, 0)]);
}

// =============================================================
// flood_fill
// =============================================================

#[test]
fn flood_fill_stops_at_other_owner() {
    let idx = index(&[((0, 0), A), ((1, 0), A), ((0, 1), A), ((1, 1), B)]);
    let area = idx.flood_fill(Cell::new(0, 0), A);
    assert_eq!(area, vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0)]);
}

#[test]
fn flood_fill_ignores_diagonal_neighbors() {
    let idx = index(&[((0, 0), A), ((1, 1), A)]);
    assert_eq!(idx.flood_fill(Cell::new(0, 0), A), vec![Cell::new(0, 0)]);
}

#[test]
fn flood_fill_from_unowned_seed_is_empty() {
    let idx = index(&[((0, 0), B)]);
    assert!(idx.flood_fill(Cell::new(0, 0), A).is_empty());
    assert!(idx.flood_fill(Cell::new(5, 5), A).is_empty());
}

#[test]
fn flood_fill_follows_winding_region() {
    // U shape:
    // A . A
    // A . A
    // A A A
    let idx = index(&[
        ((0, 0), A),
        ((0, 1), A),
        ((0, 2), A),
        ((1, 2), A),
        ((2, 2), A),
        ((2, 1), A),
        ((2, 0), A),
    ]);
    assert_eq!(idx.flood_fill(Cell::new(2, 0), A).len(), 7);
}

#[test]
fn flood_fill_seed_case_does_not_matter() {
    let idx = index(&[((0, 0), A), ((0, 1), A)]);
    assert_eq!(idx.flood_fill(Cell::new(0, 1), &A.to_lowercase()).len(), 2);
}

fn pixel_records(rows: &[(i32, i32, Option<&str>)]) -> Vec<PixelRecord> {
    rows.iter()
        .map(|(x, y, owner)| PixelRecord {
            x: *x,
            y: *y,
            current_owner: owner.map(str::to_owned),
            ..PixelRecord::default()
        })
        .collect()
}
