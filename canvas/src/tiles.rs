//! Area image tiling.
//!
//! An uploaded image is stretched over the bounding box of the selected cells
//! at [`TILE_PX`] image pixels per cell (nearest-neighbour, so pixel art stays
//! crisp), then cut into one `TILE_PX`×`TILE_PX` PNG per selected cell. Each
//! tile is carried as a `data:image/png;base64,...` URL, which is what the
//! backend stores per pixel.

#[cfg(test)]
#[path = "tiles_test.rs"]
mod tiles_test;

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::consts::{ACCEPTED_IMAGE_TYPES, MAX_UPLOAD_BYTES, TILE_PX};
use crate::grid::{Cell, CellRect};

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Error produced while validating or tiling an upload.
#[derive(Debug, thiserror::Error)]
pub enum TileError {
    #[error("Invalid file type. Please use PNG, JPEG, GIF, or WebP.")]
    UnsupportedType(String),
    #[error("File too large. Maximum size is 5MB.")]
    TooLarge(u64),
    #[error("No pixels selected")]
    EmptySelection,
    #[error("Failed to read image file: {0}")]
    Decode(#[source] image::ImageError),
    #[error("Failed to encode tile: {0}")]
    Encode(#[source] image::ImageError),
    #[error("Invalid colour `{0}`; expected #rrggbb")]
    InvalidColor(String),
}

/// The image for one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub cell: Cell,
    /// `data:image/png;base64,...`
    pub data_url: String,
}

/// Check an upload's declared MIME type and size before reading it.
///
/// # Errors
///
/// [`TileError::UnsupportedType`] or [`TileError::TooLarge`].
pub fn validate_upload(mime: &str, size_bytes: u64) -> Result<(), TileError> {
    if !ACCEPTED_IMAGE_TYPES.contains(&mime) {
        return Err(TileError::UnsupportedType(mime.to_owned()));
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(TileError::TooLarge(size_bytes));
    }
    Ok(())
}

/// Decode `bytes` and stretch them over `rect` at `TILE_PX` per cell.
///
/// # Errors
///
/// [`TileError::Decode`] if the bytes are not a supported image.
pub fn scale_to_area(bytes: &[u8], rect: CellRect) -> Result<DynamicImage, TileError> {
    let img = image::load_from_memory(bytes).map_err(TileError::Decode)?;
    Ok(img.resize_exact(rect.width() * TILE_PX, rect.height() * TILE_PX, FilterType::Nearest))
}

/// Cut one tile per cell out of an image already scaled to `rect`.
///
/// Cells are located relative to the rectangle's top-left corner. Cells
/// outside `rect` are skipped.
///
/// # Errors
///
/// [`TileError::Encode`] if PNG encoding fails.
pub fn cut_tiles(scaled: &DynamicImage, rect: CellRect, cells: &[Cell]) -> Result<Vec<Tile>, TileError> {
    cells
        .iter()
        .filter(|cell| rect.contains(**cell))
        .map(|cell| {
            let local_x = (cell.x - rect.min_x).unsigned_abs();
            let local_y = (cell.y - rect.min_y).unsigned_abs();
            let tile = scaled.crop_imm(local_x * TILE_PX, local_y * TILE_PX, TILE_PX, TILE_PX);
            Ok(Tile { cell: *cell, data_url: png_data_url(&tile)? })
        })
        .collect()
}

/// Scale an upload over the bounding box of `cells` and cut it into tiles.
///
/// # Errors
///
/// [`TileError::EmptySelection`] for no cells, otherwise decode/encode errors.
pub fn tile_upload(bytes: &[u8], cells: &[Cell]) -> Result<Vec<Tile>, TileError> {
    let rect = CellRect::bounding(cells).ok_or(TileError::EmptySelection)?;
    let scaled = scale_to_area(bytes, rect)?;
    cut_tiles(&scaled, rect, cells)
}

/// Encode an image as a PNG data URL.
///
/// # Errors
///
/// [`TileError::Encode`] if PNG encoding fails.
pub fn png_data_url(img: &DynamicImage) -> Result<String, TileError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).map_err(TileError::Encode)?;
    Ok(format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(buf.into_inner())))
}

/// Parse a `#rrggbb` colour (as produced by `<input type="color">`).
///
/// # Errors
///
/// [`TileError::InvalidColor`] for anything else.
pub fn parse_hex_color(color: &str) -> Result<Rgba<u8>, TileError> {
    let invalid = || TileError::InvalidColor(color.to_owned());
    let hex = color.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, 255]))
}

/// A single-colour `TILE_PX`×`TILE_PX` tile as a PNG data URL.
///
/// # Errors
///
/// [`TileError::InvalidColor`] or [`TileError::Encode`].
pub fn solid_tile(color: &str) -> Result<String, TileError> {
    let rgba = parse_hex_color(color)?;
    png_data_url(&DynamicImage::ImageRgba8(RgbaImage::from_pixel(TILE_PX, TILE_PX, rgba)))
}
