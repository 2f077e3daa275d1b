//! Rendering: replays a display list onto a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a display list built by [`crate::scene::build`] and produces
//! pixels; it does not mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::consts::{
    GRID_LINE_COLOR, HIGHLIGHT_COLOR, HIGHLIGHT_LINE_WIDTH, LABEL_BACKGROUND, LABEL_COLOR, LABEL_FONT,
    SELECTION_DASH_PX, SELECTION_FILL, SELECTION_STROKE,
};
use crate::scene::{DrawOp, ScreenRect};
use crate::viewport::Point;

/// Label box padding in CSS pixels.
const LABEL_PAD_PX: f64 = 3.0;
/// Label box height in CSS pixels.
const LABEL_HEIGHT_PX: f64 = 16.0;

/// Draw every op in order. `image` is the base map; image ops are skipped
/// when it is absent.
///
/// `dpr` is the device pixel ratio; ops are in CSS pixels.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    ops: &[DrawOp],
    image: Option<&HtmlImageElement>,
    dpr: f64,
) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    for op in ops {
        match op {
            DrawOp::Clear { width, height } => ctx.clear_rect(0.0, 0.0, *width, *height),
            DrawOp::MapImage(rect) => {
                if let Some(img) = image {
                    draw_map_image(ctx, img, *rect)?;
                }
            }
            DrawOp::GridLines(lines) => stroke_segments(ctx, lines, GRID_LINE_COLOR, 1.0),
            DrawOp::Highlight(lines) => stroke_segments(ctx, lines, HIGHLIGHT_COLOR, HIGHLIGHT_LINE_WIDTH),
            DrawOp::SelectionFill(rect) => {
                ctx.set_fill_style_str(SELECTION_FILL);
                ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
            }
            DrawOp::SelectionOutline(rect) => draw_selection_outline(ctx, *rect)?,
            DrawOp::Label { text, at } => draw_label(ctx, text, *at)?,
        }
    }
    Ok(())
}

fn draw_map_image(ctx: &CanvasRenderingContext2d, img: &HtmlImageElement, rect: ScreenRect) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_image_smoothing_enabled(false);
    ctx.draw_image_with_html_image_element_and_dw_and_dh(img, rect.x, rect.y, rect.width, rect.height)?;
    ctx.restore();
    Ok(())
}

/// Stroke many segments as a single path.
fn stroke_segments(ctx: &CanvasRenderingContext2d, lines: &[(Point, Point)], color: &str, width: f64) {
    ctx.save();
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(width);
    ctx.begin_path();
    for (a, b) in lines {
        ctx.move_to(a.x, a.y);
        ctx.line_to(b.x, b.y);
    }
    ctx.stroke();
    ctx.restore();
}

fn draw_selection_outline(ctx: &CanvasRenderingContext2d, rect: ScreenRect) -> Result<(), JsValue> {
    ctx.save();
    let dash_array = js_sys::Array::new();
    dash_array.push(&SELECTION_DASH_PX.into());
    dash_array.push(&SELECTION_DASH_PX.into());
    ctx.set_line_dash(&dash_array)?;
    ctx.set_stroke_style_str(SELECTION_STROKE);
    ctx.set_line_width(2.0);
    ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}

/// Label sitting on top of its anchor, on a light backing box.
fn draw_label(ctx: &CanvasRenderingContext2d, text: &str, at: Point) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_font(LABEL_FONT);
    ctx.set_text_align("left");
    ctx.set_text_baseline("bottom");
    let width = ctx.measure_text(text)?.width();
    ctx.set_fill_style_str(LABEL_BACKGROUND);
    ctx.fill_rect(at.x, at.y - LABEL_HEIGHT_PX, width + LABEL_PAD_PX * 2.0, LABEL_HEIGHT_PX);
    ctx.set_fill_style_str(LABEL_COLOR);
    ctx.fill_text(text, at.x + LABEL_PAD_PX, at.y - 2.0)?;
    ctx.restore();
    Ok(())
}
