use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlImageElement,
    HtmlSelectElement, KeyboardEvent, MouseEvent, TouchEvent,
};

use jigsaw_core::{
    GameRules, InputController, Piece, PieceId, PieceVariant, Session, TouchRelease, side_len,
};

mod assets;
mod feedback;
mod layout;
mod render;
mod state;
mod upload;

use layout::BoardLayout;
use state::{STATE, State};

const DEFAULT_DIFFICULTY: usize = 9;

/// Log a message to the browser console.
pub(crate) fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

fn init_canvas(
    document: &Document,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let cv = document
        .get_element_by_id("cv")
        .ok_or_else(|| JsValue::from_str("canvas #cv not found"))?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = cv
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D context not available"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    Ok((cv, ctx))
}

/// Ensure the canvas backing store matches the CSS size and device pixel
/// ratio to prevent non-uniform stretching.
fn sync_canvas_size(state: &mut State) {
    let dpr = state.window.device_pixel_ratio();
    let (css_w, css_h) = if let Some(el) = state.canvas.dyn_ref::<web_sys::Element>() {
        let rect = el.get_bounding_client_rect();
        (rect.width().max(1.0), rect.height().max(1.0))
    } else {
        (
            state.canvas.client_width() as f64,
            state.canvas.client_height() as f64,
        )
    };
    let target_w = (css_w * dpr).round().clamp(1.0, 10000.0) as u32;
    let target_h = (css_h * dpr).round().clamp(1.0, 10000.0) as u32;
    if state.canvas.width() != target_w {
        state.canvas.set_width(target_w);
    }
    if state.canvas.height() != target_h {
        state.canvas.set_height(target_h);
    }
}

fn compute_layout(state: &State) -> BoardLayout {
    BoardLayout::compute(
        state.canvas.width() as f64,
        state.canvas.height() as f64,
        side_len(state.difficulty),
    )
}

/// (Re)start a session. A new image replaces the current one; `None` keeps
/// it, so restarts and difficulty changes reuse the loaded picture.
pub(crate) fn start_session(
    state: &Rc<RefCell<State>>,
    image: Option<HtmlImageElement>,
    variant: PieceVariant,
) {
    {
        let mut s = state.borrow_mut();
        if image.is_some() {
            s.image = image;
            s.variant = variant;
        }
        stop_timer(&mut s);
        sync_canvas_size(&mut s);
        let difficulty = s.difficulty;
        let v = s.variant;
        s.session.start(Piece::grid(difficulty, v));
        s.input = InputController::new();
        s.layout = compute_layout(&s);
        render::update_status_dom(&s);
        render::draw(&s);
    }
    start_timer(state.clone());
}

/// The 1 Hz session clock. Cleared on restart and on completion so no
/// orphaned tick keeps firing.
fn start_timer(state: Rc<RefCell<State>>) {
    let window = state.borrow().window.clone();
    let st = state.clone();
    let tick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        // A stray tick after completion is inert inside the core.
        let mut s = st.borrow_mut();
        s.session.tick();
        render::update_status_dom(&s);
    }));
    if let Ok(handle) = window
        .set_interval_with_callback_and_timeout_and_arguments_0(tick.as_ref().unchecked_ref(), 1000)
    {
        state.borrow_mut().timer_handle = Some(handle);
    }
    tick.forget();
}

fn stop_timer(state: &mut State) {
    if let Some(handle) = state.timer_handle.take() {
        state.window.clear_interval_with_handle(handle);
    }
}

/// The shared placement path for both input modalities.
fn apply_drop(s: &mut State, piece: PieceId, slot: usize) {
    let outcome = s.session.drop_piece(piece, slot);
    let events = s.session.take_events();
    feedback::dispatch(s, &events);
    if outcome.completed {
        stop_timer(s);
    }
    render::update_status_dom(s);
    render::draw(s);
}

/// The piece under a canvas point (board slot first, then the tray) and the
/// top-left corner it is currently drawn at.
fn piece_under(s: &State, x: f64, y: f64) -> Option<(PieceId, (f64, f64))> {
    let board = s.session.board();
    if let Some(index) = s.layout.slot_index_at(x, y)
        && let Some(id) = board.slot(index)
    {
        return Some((id, s.layout.slot_origin(index)));
    }
    let count = board.unplaced().count();
    if let Some(nth) = s.layout.tray_cell_at(x, y, count) {
        let id = board.unplaced().nth(nth)?.id;
        return Some((id, s.layout.tray_origin(nth)));
    }
    None
}

fn attach_ui(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();

    upload::attach_file_input(state.clone())?;

    // Restart button keeps the current picture.
    if let Some(btn) = doc.get_element_by_id("restart") {
        let btn: HtmlElement = btn.dyn_into()?;
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let variant = st.borrow().variant;
            start_session(&st, None, variant);
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    // Difficulty selector (4, 9, 16, 25 pieces).
    if let Some(sel) = doc.get_element_by_id("difficulty") {
        let sel: HtmlSelectElement = sel.dyn_into()?;
        let st = state.clone();
        let sel_read = sel.clone();
        let onchange = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let Ok(difficulty) = sel_read.value().parse::<usize>() else {
                return;
            };
            let variant = {
                let mut s = st.borrow_mut();
                s.difficulty = difficulty;
                s.variant
            };
            start_session(&st, None, variant);
        }));
        sel.set_onchange(Some(onchange.as_ref().unchecked_ref()));
        onchange.forget();
    }

    // Pointer modality.
    {
        let st = state.clone();
        let mousedown = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let mut s = st.borrow_mut();
            let pt = layout::event_canvas_coords(&e, &s.canvas);
            s.last_pointer = pt;
            if let Some((id, _)) = piece_under(&s, pt.0, pt.1) {
                s.input.pointer_down(id);
                render::draw(&s);
            }
        }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("mousedown", mousedown.as_ref().unchecked_ref())?;
        mousedown.forget();
    }
    {
        let st = state.clone();
        let mousemove = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let mut s = st.borrow_mut();
            if s.input.active() {
                s.last_pointer = layout::event_canvas_coords(&e, &s.canvas);
                render::draw(&s);
            }
        }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref())?;
        mousemove.forget();
    }
    {
        let st = state.clone();
        let mouseup = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let mut s = st.borrow_mut();
            let pt = layout::event_canvas_coords(&e, &s.canvas);
            // The drop target carries its own index: one exact lookup.
            let slot = s.layout.slot_index_at(pt.0, pt.1);
            match s.input.pointer_drop(slot) {
                Some((piece, slot)) => apply_drop(&mut s, piece, slot),
                None => render::draw(&s),
            }
        }));
        state
            .borrow()
            .window
            .add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref())?;
        mouseup.forget();
    }

    // Touch modality.
    {
        let st = state.clone();
        let touchstart = Closure::<dyn FnMut(TouchEvent)>::wrap(Box::new(move |e: TouchEvent| {
            let Some(t) = e.touches().item(0) else {
                return;
            };
            e.prevent_default();
            let mut s = st.borrow_mut();
            let pt = layout::touch_canvas_coords(&t, &s.canvas);
            if let Some((id, origin)) = piece_under(&s, pt.0, pt.1) {
                s.input
                    .touch_start(id, (pt.0 - origin.0, pt.1 - origin.1), pt);
                render::draw(&s);
            }
        }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("touchstart", touchstart.as_ref().unchecked_ref())?;
        touchstart.forget();
    }
    {
        let st = state.clone();
        let touchmove = Closure::<dyn FnMut(TouchEvent)>::wrap(Box::new(move |e: TouchEvent| {
            let Some(t) = e.touches().item(0) else {
                return;
            };
            e.prevent_default();
            let mut s = st.borrow_mut();
            let pt = layout::touch_canvas_coords(&t, &s.canvas);
            let lay = s.layout;
            s.input.touch_move(pt, &lay);
            render::draw(&s);
        }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("touchmove", touchmove.as_ref().unchecked_ref())?;
        touchmove.forget();
    }
    {
        let st = state.clone();
        let touchend = Closure::<dyn FnMut(TouchEvent)>::wrap(Box::new(move |e: TouchEvent| {
            e.prevent_default();
            let mut s = st.borrow_mut();
            let lay = s.layout;
            let radius = s.session.rules().probe_radius;
            match s.input.touch_end(&lay, radius) {
                TouchRelease::Hit { piece, slot } => apply_drop(&mut s, piece, slot),
                TouchRelease::Miss { piece } => {
                    // No mutation; the piece stays wherever it was.
                    s.session.note_touch_miss(piece);
                    let events = s.session.take_events();
                    feedback::dispatch(&s, &events);
                    render::draw(&s);
                }
                TouchRelease::Idle => {}
            }
        }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("touchend", touchend.as_ref().unchecked_ref())?;
        touchend.forget();
    }

    // Debug and hint toggles.
    {
        let st = state.clone();
        let keydown =
            Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(move |e: KeyboardEvent| {
                let key = e.key().to_lowercase();
                let mut s = st.borrow_mut();
                match key.as_str() {
                    "d" => {
                        let rules = s.session.rules_mut();
                        rules.debug_mode = !rules.debug_mode;
                    }
                    "h" => {
                        let rules = s.session.rules_mut();
                        rules.hints_enabled = !rules.hints_enabled;
                    }
                    _ => return,
                }
                render::update_status_dom(&s);
                render::draw(&s);
            }));
        state
            .borrow()
            .window
            .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        keydown.forget();
    }

    // Re-fit the board when the window changes size.
    {
        let st = state.clone();
        let onresize = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let mut s = st.borrow_mut();
            sync_canvas_size(&mut s);
            s.layout = compute_layout(&s);
            render::draw(&s);
        }));
        state
            .borrow()
            .window
            .add_event_listener_with_callback("resize", onresize.as_ref().unchecked_ref())?;
        onresize.forget();
    }

    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let (canvas, ctx) = init_canvas(&document)?;

    let state = Rc::new(RefCell::new(State {
        window,
        document,
        canvas,
        ctx,
        session: Session::new(GameRules::default()),
        input: InputController::new(),
        layout: BoardLayout::default(),
        image: None,
        variant: PieceVariant::Simple,
        difficulty: DEFAULT_DIFFICULTY,
        last_pointer: (0.0, 0.0),
        timer_handle: None,
    }));
    STATE.with(|st| st.replace(Some(state.clone())));

    {
        let mut s = state.borrow_mut();
        sync_canvas_size(&mut s);
        s.layout = compute_layout(&s);
        render::update_status_dom(&s);
        render::draw(&s);
    }
    attach_ui(state.clone())?;
    assets::load_presets(state.clone());
    Ok(())
}
