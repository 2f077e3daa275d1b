use super::*;
use image::{Rgba, RgbaImage};

fn encode_png(img: RgbaImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img).write_to(&mut buf, ImageFormat::Png).expect("encode");
    buf.into_inner()
}

fn decode_data_url(url: &str) -> DynamicImage {
    let b64 = url.strip_prefix(PNG_DATA_URL_PREFIX).expect("png data url");
    let bytes = STANDARD.decode(b64).expect("base64");
    image::load_from_memory(&bytes).expect("png")
}

/// A w×h-cell image where every 10×10 block has a colour derived from its cell.
fn checker(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w * TILE_PX, h * TILE_PX, |x, y| block_color(x / TILE_PX, y / TILE_PX))
}

fn block_color(bx: u32, by: u32) -> Rgba<u8> {
    Rgba([u8::try_from(bx * 40).expect("red"), u8::try_from(by * 40).expect("green"), 200, 255])
}

// =============================================================
// validate_upload
// =============================================================

#[test]
fn accepted_types_pass() {
    for mime in ACCEPTED_IMAGE_TYPES {
        assert!(validate_upload(mime, 1024).is_ok(), "{mime}");
    }
}

#[test]
fn svg_is_rejected() {
    let err = validate_upload("image/svg+xml", 10).expect_err("svg");
    assert_eq!(err.to_string(), "Invalid file type. Please use PNG, JPEG, GIF, or WebP.");
}

#[test]
fn oversize_file_is_rejected() {
    let err = validate_upload("image/png", MAX_UPLOAD_BYTES + 1).expect_err("too large");
    assert_eq!(err.to_string(), "File too large. Maximum size is 5MB.");
    assert!(validate_upload("image/png", MAX_UPLOAD_BYTES).is_ok());
}

// =============================================================
// Tiling
// =============================================================

#[test]
fn tiles_are_ten_by_ten_crops_at_cell_offsets() {
    let cells = CellRect::from_corners(Cell::new(20, 40), Cell::new(22, 41)).cells();
    let tiles = tile_upload(&encode_png(checker(3, 2)), &cells).expect("tiles");
    assert_eq!(tiles.len(), 6);
    for tile in &tiles {
        let img = decode_data_url(&tile.data_url).to_rgba8();
        assert_eq!(img.dimensions(), (TILE_PX, TILE_PX));
        let expected = block_color((tile.cell.x - 20).unsigned_abs(), (tile.cell.y - 40).unsigned_abs());
        assert!(img.pixels().all(|p| *p == expected), "tile {:?}", tile.cell);
    }
}

#[test]
fn source_is_stretched_to_area_size() {
    // A 2x1 source stretched over a 2x1-cell area: left half red, right half blue.
    let src = RgbaImage::from_fn(2, 1, |x, _| if x == 0 { Rgba([255, 0, 0, 255]) } else { Rgba([0, 0, 255, 255]) });
    let cells = vec![Cell::new(0, 0), Cell::new(1, 0)];
    let tiles = tile_upload(&encode_png(src), &cells).expect("tiles");
    let left = decode_data_url(&tiles[0].data_url).to_rgba8();
    let right = decode_data_url(&tiles[1].data_url).to_rgba8();
    assert!(left.pixels().all(|p| *p == Rgba([255, 0, 0, 255])));
    assert!(right.pixels().all(|p| *p == Rgba([0, 0, 255, 255])));
}

#[test]
fn sparse_selection_uses_bounding_box() {
    // Only the two corner cells of a 3x1 box: tiles come from x offsets 0 and 2.
    let cells = vec![Cell::new(5, 5), Cell::new(7, 5)];
    let tiles = tile_upload(&encode_png(checker(3, 1)), &cells).expect("tiles");
    assert_eq!(tiles.len(), 2);
    let right = decode_data_url(&tiles[1].data_url).to_rgba8();
    assert_eq!(*right.get_pixel(0, 0), block_color(2, 0));
}

#[test]
fn empty_selection_is_rejected() {
    let err = tile_upload(&encode_png(checker(1, 1)), &[]).expect_err("empty");
    assert!(matches!(err, TileError::EmptySelection));
}

#[test]
fn garbage_bytes_fail_to_decode() {
    let err = tile_upload(b"not an image", &[Cell::new(0, 0)]).expect_err("decode");
    assert!(matches!(err, TileError::Decode(_)));
}

#[test]
fn scale_to_area_sets_dimensions() {
    let rect = CellRect::from_corners(Cell::new(0, 0), Cell::new(3, 1));
    let scaled = scale_to_area(&encode_png(checker(1, 1)), rect).expect("scale");
    assert_eq!((scaled.width(), scaled.height()), (40, 20));
}

// =============================================================
// solid_tile
// =============================================================

#[test]
fn solid_tile_is_one_colour_at_tile_size() {
    let img = decode_data_url(&solid_tile("#FF8000").expect("tile")).to_rgba8();
    assert_eq!(img.dimensions(), (TILE_PX, TILE_PX));
    assert!(img.pixels().all(|p| *p == Rgba([255, 128, 0, 255])));
}

#[test]
fn malformed_colours_are_rejected() {
    for color in ["ff0000", "#ff00", "#gg0000", "#ff00000", "#ffé00"] {
        assert!(matches!(solid_tile(color), Err(TileError::InvalidColor(_))), "{color}");
    }
}
