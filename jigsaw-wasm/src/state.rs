use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement, Window};

use jigsaw_core::{InputController, PieceVariant, Session};

use crate::layout::BoardLayout;

/// Global application state stored behind an `Rc<RefCell<_>>` so it can be
/// shared across the WASM callbacks.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub session: Session,
    pub input: InputController,
    pub layout: BoardLayout,
    /// Source image currently sliced into pieces, if one has loaded.
    pub image: Option<HtmlImageElement>,
    pub variant: PieceVariant,
    pub difficulty: usize,
    /// Last known pointer position, for the drag ghost.
    pub last_pointer: (f64, f64),
    pub timer_handle: Option<i32>,
}

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}
