use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, FileReader, HtmlImageElement, HtmlInputElement};

use jigsaw_core::PieceVariant;

use crate::log;
use crate::state::State;

// Wires up the file input so a family photo becomes the next puzzle.
pub fn attach_file_input(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc: Document = state.borrow().document.clone();
    if let Some(input) = doc.get_element_by_id("file") {
        let input: HtmlInputElement = input.dyn_into()?;
        let st = state.clone();
        let input_for_closure = input.clone();
        let onchange = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_e: Event| {
            let Some(files) = input_for_closure.files() else {
                log("No file list on input");
                return;
            };
            let Some(file) = files.item(0) else {
                log("No file selected");
                return;
            };
            let Ok(reader) = FileReader::new() else {
                return;
            };
            let st2 = st.clone();
            let reader_for_closure = reader.clone();
            let onload = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_ev: Event| {
                let Ok(result) = reader_for_closure.result() else {
                    return;
                };
                let Some(data_url) = result.as_string() else {
                    log("Selected file is not readable as a data URL");
                    return;
                };
                let Ok(img) = HtmlImageElement::new() else {
                    return;
                };
                let st3 = st2.clone();
                let img_loaded = img.clone();
                let img_onload = Closure::<dyn FnMut()>::wrap(Box::new(move || {
                    crate::start_session(&st3, Some(img_loaded.clone()), PieceVariant::Custom);
                }));
                img.set_onload(Some(img_onload.as_ref().unchecked_ref()));
                img_onload.forget();
                img.set_src(&data_url);
            }));
            reader.set_onload(Some(onload.as_ref().unchecked_ref()));
            if let Err(e) = reader.read_as_data_url(&file) {
                log(&format!("Failed to read file: {:?}", e));
            }
            onload.forget();
        }));
        input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
        onchange.forget();
    }
    Ok(())
}
