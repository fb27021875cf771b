use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlElement, HtmlImageElement};

use jigsaw_core::{Piece, SessionStatus};

use crate::state::State;

// Non-deprecated helpers to set canvas styles via property assignment.
pub fn set_fill_style(ctx: &CanvasRenderingContext2d, color: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("fillStyle"),
        &JsValue::from_str(color),
    );
}

pub fn set_stroke_style(ctx: &CanvasRenderingContext2d, color: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(color),
    );
}

/// Redraw the whole scene: board grid, placed pieces, hint outlines, the
/// tray of unplaced pieces and the live drag ghost.
pub fn draw(state: &State) {
    let ctx = &state.ctx;
    let width = state.canvas.width() as f64;
    let height = state.canvas.height() as f64;
    ctx.clear_rect(0.0, 0.0, width, height);

    let board = state.session.board();
    let layout = &state.layout;
    if board.difficulty() == 0 {
        return;
    }

    // Board background and grid lines.
    set_fill_style(ctx, "#f6f3ee");
    ctx.fill_rect(layout.board_x, layout.board_y, layout.board_size(), layout.board_size());
    for index in 0..board.difficulty() {
        let (x, y) = layout.slot_origin(index);
        set_stroke_style(ctx, "#c9c2b8");
        ctx.set_line_width(1.0);
        ctx.stroke_rect(x, y, layout.cell, layout.cell);
    }

    // Cell under the finger during a touch drag, highlight only.
    if let Some(slot) = state.input.hover_slot() {
        let (x, y) = layout.slot_origin(slot);
        set_fill_style(ctx, games_core::hint_color());
        ctx.fill_rect(x, y, layout.cell, layout.cell);
    }

    // Hint outlines at each unplaced piece's home slot.
    if state.session.rules().hints_enabled {
        for p in board.unplaced() {
            let index = p.correct.row * layout.side + p.correct.col;
            let (x, y) = layout.slot_origin(index);
            set_stroke_style(ctx, games_core::hint_color());
            ctx.set_line_width(3.0);
            ctx.stroke_rect(x + 2.0, y + 2.0, layout.cell - 4.0, layout.cell - 4.0);
        }
    }

    // Placed pieces.
    let dragged = state.input.dragged_piece();
    for index in 0..board.difficulty() {
        if let Some(id) = board.slot(index) {
            if Some(id) == dragged {
                continue;
            }
            let (x, y) = layout.slot_origin(index);
            draw_piece(state, board.piece(id), x, y, layout.cell);
        }
    }

    // Tray of unplaced pieces.
    for (nth, p) in board.unplaced().enumerate() {
        if Some(p.id) == dragged {
            continue;
        }
        let (x, y) = layout.tray_origin(nth);
        draw_piece(state, p, x, y, layout.tray_cell);
    }

    // Drag ghost follows the pointer or finger.
    if let Some(id) = dragged {
        let (px, py) = if state.input.touch().dragging {
            let t = state.input.touch();
            (t.drag_pos.0 - t.offset.0, t.drag_pos.1 - t.offset.1)
        } else {
            (
                state.last_pointer.0 - layout.cell / 2.0,
                state.last_pointer.1 - layout.cell / 2.0,
            )
        };
        draw_piece(state, board.piece(id), px, py, layout.cell);
    }
}

/// One piece tile: a slice of the source image when one is loaded, otherwise
/// a numbered colored square so the game is playable before any upload.
fn draw_piece(state: &State, piece: &Piece, x: f64, y: f64, size: f64) {
    let ctx = &state.ctx;
    match &state.image {
        Some(img) => {
            let (sx, sy, sw, sh) = source_rect(img, piece, state.layout.side);
            let _ = ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                img, sx, sy, sw, sh, x, y, size, size,
            );
        }
        None => {
            set_fill_style(ctx, games_core::piece_color(piece.id));
            ctx.fill_rect(x, y, size, size);
            let label = (piece.id + 1).to_string();
            let font = (size * 0.4).clamp(10.0, 28.0);
            ctx.set_font(&format!("bold {}px sans-serif", font));
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            set_fill_style(ctx, "#fff");
            let _ = ctx.fill_text(&label, x + size / 2.0, y + size / 2.0);
        }
    }
    set_stroke_style(ctx, if piece.solved { "#2e8b57" } else { "#333" });
    ctx.set_line_width(if piece.solved { 3.0 } else { 1.5 });
    ctx.stroke_rect(x, y, size, size);
}

/// Source-image rectangle for a piece's tile, cut along its correct
/// position. Variant only changes where the image came from, never the cut.
fn source_rect(img: &HtmlImageElement, piece: &Piece, side: usize) -> (f64, f64, f64, f64) {
    let tile_w = img.natural_width() as f64 / side as f64;
    let tile_h = img.natural_height() as f64 / side as f64;
    (
        piece.correct.col as f64 * tile_w,
        piece.correct.row as f64 * tile_h,
        tile_w,
        tile_h,
    )
}

/// Mirror score/timer/status into the host page, if the elements exist.
pub fn update_status_dom(state: &State) {
    let doc = &state.document;
    if let Some(el) = doc.get_element_by_id("score")
        && let Ok(el) = el.dyn_into::<HtmlElement>()
    {
        el.set_inner_text(&format!("Score: {}", state.session.score()));
    }
    if let Some(el) = doc.get_element_by_id("timer")
        && let Ok(el) = el.dyn_into::<HtmlElement>()
    {
        let secs = state.session.seconds();
        el.set_inner_text(&format!("{}:{:02}", secs / 60, secs % 60));
    }
    if let Some(el) = doc.get_element_by_id("status")
        && let Ok(el) = el.dyn_into::<HtmlElement>()
    {
        let txt = match state.session.status() {
            SessionStatus::Idle => "Pick a picture to start".to_string(),
            SessionStatus::Playing => {
                let rules = state.session.rules();
                let mut parts = vec![format!(
                    "{} / {} placed",
                    state.session.board().solved_count(),
                    state.session.board().difficulty()
                )];
                if rules.hints_enabled {
                    parts.push("hints on".to_string());
                }
                if rules.debug_mode {
                    parts.push("debug".to_string());
                }
                parts.join("  |  ")
            }
            SessionStatus::Completed => "Well done!".to_string(),
        };
        el.set_inner_text(&txt);
    }
}
