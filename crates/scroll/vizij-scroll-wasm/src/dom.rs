//! Document reads and writes used by the browser wiring.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use vizij_scroll_core::{CaptionTable, ScrollMetrics};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

/// Read scroll offsets from both the document element and the body.
///
/// The document offset comes from `window.scrollY`, which keeps fractional
/// pixels; element offsets are whole pixels.
pub fn scroll_metrics(doc: &Document) -> ScrollMetrics {
    let root = doc.document_element();
    let body = doc.body();
    let document_scroll_top = match doc.default_view().map(|w| w.scroll_y()) {
        Some(Ok(y)) => y as f32,
        _ => root.as_ref().map_or(0, |e| e.scroll_top()) as f32,
    };
    ScrollMetrics {
        document_scroll_top,
        body_scroll_top: body.as_ref().map_or(0, |b| b.scroll_top()) as f32,
        document_scroll_height: root.as_ref().map_or(0, |e| e.scroll_height()) as f32,
        body_scroll_height: body.as_ref().map_or(0, |b| b.scroll_height()) as f32,
        client_height: root.as_ref().map_or(0, |e| e.client_height()) as f32,
    }
}

/// Write caption opacities. Missing elements are skipped.
pub fn apply_captions(doc: &Document, table: &CaptionTable, opacities: &[f32]) {
    for (caption, opacity) in table.captions.iter().zip(opacities) {
        let Some(el) = doc
            .get_element_by_id(&caption.id)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        else {
            log::debug!("caption element '{}' not found", caption.id);
            continue;
        };
        if let Err(e) = el.style().set_property("opacity", &opacity.to_string()) {
            log::error!("failed to set opacity on '{}': {:?}", caption.id, e);
        }
    }
}

pub fn set_overlay_text(doc: &Document, id: &str, text: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Current inner size of the window in CSS pixels.
pub fn inner_size(win: &Window) -> Result<(f32, f32), JsValue> {
    let w = win.inner_width()?.as_f64().unwrap_or(0.0);
    let h = win.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((w as f32, h as f32))
}

pub fn scroll_to_top(win: &Window) {
    let opts = ScrollToOptions::new();
    opts.set_top(0.0);
    opts.set_behavior(ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&opts);
}
