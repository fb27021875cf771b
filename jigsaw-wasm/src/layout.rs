use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent, Touch};

use jigsaw_core::SlotResolver;

/// Canvas-space geometry for the board grid and the piece tray. Recomputed
/// whenever a session starts or the difficulty changes; everything else
/// derives cell rectangles from it.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoardLayout {
    pub side: usize,
    pub board_x: f64,
    pub board_y: f64,
    pub cell: f64,
    pub tray_x: f64,
    pub tray_y: f64,
    pub tray_cell: f64,
    pub tray_cols: usize,
}

const MARGIN: f64 = 16.0;

impl BoardLayout {
    pub fn compute(canvas_w: f64, canvas_h: f64, side: usize) -> Self {
        // Board square on the left, tray column on the right.
        let board_size = (canvas_h - 2.0 * MARGIN)
            .min(canvas_w * 0.62 - 2.0 * MARGIN)
            .max(1.0);
        let cell = if side > 0 {
            board_size / side as f64
        } else {
            0.0
        };
        let tray_x = MARGIN * 2.0 + board_size;
        let tray_cell = (cell * 0.6).max(24.0);
        let tray_cols = (((canvas_w - tray_x - MARGIN) / (tray_cell + 8.0)) as usize).max(1);
        BoardLayout {
            side,
            board_x: MARGIN,
            board_y: MARGIN,
            cell,
            tray_x,
            tray_y: MARGIN,
            tray_cell,
            tray_cols,
        }
    }

    pub fn board_size(&self) -> f64 {
        self.cell * self.side as f64
    }

    /// Exact containment lookup: the grid cell under a canvas point.
    pub fn slot_index_at(&self, x: f64, y: f64) -> Option<usize> {
        if self.side == 0 || self.cell <= 0.0 {
            return None;
        }
        let fx = x - self.board_x;
        let fy = y - self.board_y;
        if fx < 0.0 || fy < 0.0 || fx >= self.board_size() || fy >= self.board_size() {
            return None;
        }
        let col = (fx / self.cell) as usize;
        let row = (fy / self.cell) as usize;
        Some(row * self.side + col)
    }

    /// Top-left corner of a board slot.
    pub fn slot_origin(&self, index: usize) -> (f64, f64) {
        let row = index / self.side;
        let col = index % self.side;
        (
            self.board_x + col as f64 * self.cell,
            self.board_y + row as f64 * self.cell,
        )
    }

    /// Top-left corner of the nth tray cell.
    pub fn tray_origin(&self, nth: usize) -> (f64, f64) {
        let gap = 8.0;
        let col = nth % self.tray_cols;
        let row = nth / self.tray_cols;
        (
            self.tray_x + col as f64 * (self.tray_cell + gap),
            self.tray_y + row as f64 * (self.tray_cell + gap),
        )
    }

    /// Which tray cell (nth unplaced piece) sits under a canvas point.
    pub fn tray_cell_at(&self, x: f64, y: f64, count: usize) -> Option<usize> {
        for nth in 0..count {
            let (ox, oy) = self.tray_origin(nth);
            if x >= ox && x < ox + self.tray_cell && y >= oy && y < oy + self.tray_cell {
                return Some(nth);
            }
        }
        None
    }
}

impl SlotResolver for BoardLayout {
    fn resolve_slot_at(&self, x: f64, y: f64) -> Option<usize> {
        self.slot_index_at(x, y)
    }
}

/// Convert mouse client coordinates into canvas internal pixel coordinates
/// so hit testing works even if CSS scales the canvas element.
pub fn event_canvas_coords(e: &MouseEvent, cv: &HtmlCanvasElement) -> (f64, f64) {
    client_to_canvas(e.client_x() as f64, e.client_y() as f64, cv)
}

/// Same conversion for a single touch point.
pub fn touch_canvas_coords(t: &Touch, cv: &HtmlCanvasElement) -> (f64, f64) {
    client_to_canvas(t.client_x() as f64, t.client_y() as f64, cv)
}

fn client_to_canvas(cx: f64, cy: f64, cv: &HtmlCanvasElement) -> (f64, f64) {
    if let Some(el) = cv.dyn_ref::<web_sys::Element>() {
        let rect = el.get_bounding_client_rect();
        let x = (cx - rect.left()) * (cv.width() as f64) / rect.width().max(1.0);
        let y = (cy - rect.top()) * (cv.height() as f64) / rect.height().max(1.0);
        (x, y)
    } else {
        (cx, cy)
    }
}
