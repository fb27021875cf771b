use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, HtmlImageElement, HtmlSelectElement, Window};

use jigsaw_core::PieceVariant;

use crate::log;
use crate::state::State;

/// One bundled picture children can pick from the menu.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub image: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PresetCatalog {
    pub presets: Vec<Preset>,
}

/// Build an absolute URL for an asset, taking into account the optional
/// `window.__BASE_URL` which is set by the host page.
pub fn asset_url(path: &str) -> String {
    let p = path.trim();
    if p.starts_with("http://") || p.starts_with("https://") || p.starts_with("data:") {
        return p.to_string();
    }
    let base = web_sys::window()
        .and_then(|w| {
            let v = js_sys::Reflect::get(&w, &JsValue::from_str("__BASE_URL")).ok()?;
            v.as_string()
        })
        .unwrap_or_else(|| "/".to_string());
    let base = if base.ends_with('/') {
        base
    } else {
        format!("{}/", base)
    };
    let p = p.trim_start_matches('/');
    format!("{}{}", base, p)
}

/// Fetch a text resource trying a list of fallback URLs in order.
pub async fn fetch_text_with_fallbacks(window: &Window, urls: &[&str]) -> Option<String> {
    for url in urls {
        let resp_value =
            match wasm_bindgen_futures::JsFuture::from(window.fetch_with_str(url)).await {
                Ok(v) => v,
                Err(_) => continue,
            };
        let resp: web_sys::Response = match resp_value.dyn_into() {
            Ok(r) => r,
            Err(_) => continue,
        };
        if !resp.ok() {
            continue;
        }
        if let Ok(text_promise) = resp.text()
            && let Ok(text_js) = wasm_bindgen_futures::JsFuture::from(text_promise).await
            && let Some(s) = text_js.as_string()
        {
            return Some(s);
        }
    }
    None
}

/// Simple query string parser used at start-up.
pub fn get_query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_encoding::percent_decode_str(&s)
        .decode_utf8()
        .unwrap_or_else(|_| s.clone().into())
        .to_string()
}

/// Load the preset catalogue, fill the `#preset` select and wire its
/// onchange to restart the session with the chosen picture. If the URL
/// carries `?p=<id>`, that preset starts immediately.
pub fn load_presets(state: Rc<RefCell<State>>) {
    let window = state.borrow().window.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let text = fetch_text_with_fallbacks(
            &window,
            &[&asset_url("presets.json"), "/presets.json", "presets.json"],
        )
        .await
        .unwrap_or_default();
        let catalog: PresetCatalog = match serde_json::from_str(&text) {
            Ok(c) => c,
            Err(_) => {
                log("No preset catalogue; upload a picture to play");
                return;
            }
        };
        fill_preset_select(&state, &catalog);
        // Query parameter picks an initial puzzle.
        if let Ok(search) = window.location().search()
            && let Some(id) = get_query_param(&search, "p")
            && let Some(preset) = catalog.presets.iter().find(|p| p.id == id)
        {
            start_preset(&state, preset);
        }
    });
}

fn fill_preset_select(state: &Rc<RefCell<State>>, catalog: &PresetCatalog) {
    let doc = state.borrow().document.clone();
    let Some(sel) = doc.get_element_by_id("preset") else {
        return;
    };
    let Ok(sel) = sel.dyn_into::<HtmlSelectElement>() else {
        return;
    };
    for preset in &catalog.presets {
        if let Ok(opt) = doc.create_element("option") {
            opt.set_attribute("value", &preset.id).ok();
            if let Ok(opt) = opt.dyn_into::<HtmlElement>() {
                opt.set_inner_text(&preset.name);
                let _ = sel.append_child(&opt);
            }
        }
    }
    let st = state.clone();
    let catalog = catalog.clone();
    let sel_read = sel.clone();
    let onchange = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        let id = sel_read.value();
        if let Some(preset) = catalog.presets.iter().find(|p| p.id == id) {
            start_preset(&st, preset);
        }
    }));
    sel.set_onchange(Some(onchange.as_ref().unchecked_ref()));
    onchange.forget();
}

/// Kick off an image load and restart the session once it arrives.
fn start_preset(state: &Rc<RefCell<State>>, preset: &Preset) {
    let Ok(img) = HtmlImageElement::new() else {
        return;
    };
    let st = state.clone();
    let img_loaded = img.clone();
    let onload = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        crate::start_session(&st, Some(img_loaded.clone()), PieceVariant::Simple);
    }));
    img.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();
    img.set_src(&asset_url(&preset.image));
}
