use super::*;

const A: &str = "0xaaaa000000000000000000000000000000000001";
const B: &str = "0xbbbb000000000000000000000000000000000002";

fn block(owner: &str, min: (i32, i32), max: (i32, i32)) -> Vec<(Cell, String)> {
    (min.1..=max.1)
        .flat_map(|y| (min.0..=max.0).map(move |x| (Cell::new(x, y), owner.to_owned())))
        .collect()
}

#[test]
fn surrounded_cell_draws_no_edges() {
    let idx = OwnerIndex::from_pairs(block(A, (0, 0), (2, 2)));
    assert!(cell_edges(&idx, Cell::new(1, 1)).is_empty());
}

#[test]
fn isolated_cell_draws_four_edges() {
    let idx = OwnerIndex::from_pairs(vec![(Cell::new(5, 5), A)]);
    let edges = cell_edges(&idx, Cell::new(5, 5));
    assert_eq!(edges.len(), 4);
    assert_eq!(
        edges.iter().map(|e| e.side).collect::<Vec<_>>(),
        vec![Side::Top, Side::Right, Side::Bottom, Side::Left]
    );
}

#[test]
fn neighbor_with_other_owner_is_a_border() {
    let mut pairs = block(A, (0, 0), (0, 0));
    pairs.extend(block(B, (1, 0), (1, 0)));
    let idx = OwnerIndex::from_pairs(pairs);
    let sides: Vec<Side> = cell_edges(&idx, Cell::new(0, 0)).iter().map(|e| e.side).collect();
    assert!(sides.contains(&Side::Right));
}

#[test]
fn unowned_cell_has_no_edges() {
    let idx = OwnerIndex::new();
    assert!(cell_edges(&idx, Cell::new(0, 0)).is_empty());
}

#[test]
fn block_outline_matches_perimeter() {
    // 3x2 block: perimeter is 2*(3+2) = 10 unit edges.
    let idx = OwnerIndex::from_pairs(block(A, (4, 4), (6, 5)));
    assert_eq!(owner_edges(&idx, A).len(), 10);
}

#[test]
fn owner_edges_skip_other_owners() {
    let mut pairs = block(A, (0, 0), (0, 0));
    pairs.extend(block(B, (10, 10), (11, 10)));
    let idx = OwnerIndex::from_pairs(pairs);
    assert!(owner_edges(&idx, A).iter().all(|e| e.cell == Cell::new(0, 0)));
}

#[test]
fn edge_segment_follows_viewport() {
    let vp = Viewport { pan_x: 10.0, pan_y: 20.0, cell_px: 5.0 };
    let edge = Edge { cell: Cell::new(2, 3), side: Side::Right };
    let (a, b) = edge.screen_segment(&vp);
    assert_eq!(a, Point::new(25.0, 35.0));
    assert_eq!(b, Point::new(25.0, 40.0));
}
