#![cfg(target_arch = "wasm32")]
use std::cell::Cell;
use std::rc::Rc;

use js_sys::Function;
use serde_wasm_bindgen as swb;
use vizij_scroll_core::{Frame, SceneState, ScrollUpdate, Viewport};
use vizij_scroll_wasm::{abi_version, dom, VizijScroll};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[derive(serde::Deserialize)]
struct Payload {
    frame: Frame,
    scene: SceneState,
    viewport: Viewport,
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construct_with_defaults() {
    let s = VizijScroll::new(JsValue::UNDEFINED).unwrap();
    assert_eq!(s.model_path(), "models/Helmet.glb");
    assert_eq!(s.caption_ids(), vec!["para1", "para2", "para3", "para4", "para5"]);
}

#[wasm_bindgen_test]
fn bad_config_is_rejected() {
    let cfg = swb::to_value(&serde_json::json!({ "development": "yes" })).unwrap();
    assert!(VizijScroll::new(cfg).is_err());
}

#[wasm_bindgen_test]
fn scroll_returns_caption_opacities() {
    let mut s = VizijScroll::new(JsValue::NULL).unwrap();
    let up: ScrollUpdate = swb::from_value(s.scroll(0.0, 1100.0, 100.0).unwrap()).unwrap();
    assert_eq!(up.opacities, vec![1.0, 0.0, 0.0, 0.0, 0.0]);
    assert_eq!(up.caption, Some(0));
    assert!(up.overlay.is_none());

    let up: ScrollUpdate = swb::from_value(s.scroll(220.0, 1100.0, 100.0).unwrap()).unwrap();
    assert_eq!(up.opacities, vec![0.0; 5]);
}

#[wasm_bindgen_test]
fn tick_gates_dispatch_on_model_load() {
    let mut s = VizijScroll::new(JsValue::UNDEFINED).unwrap();
    s.scroll(0.0, 1100.0, 100.0).unwrap();

    let p: Payload = swb::from_value(s.tick().unwrap()).unwrap();
    assert!(!p.frame.dispatched);
    assert_eq!(p.scene.position, [0.0, 0.0, 0.0]);

    s.model_loaded();
    let p: Payload = swb::from_value(s.tick().unwrap()).unwrap();
    assert!(p.frame.dispatched);
    assert_eq!(p.frame.fired, vec![0]);
    assert_eq!(p.scene.position, [1.0, 0.0, 0.0]);
}

#[wasm_bindgen_test]
fn failed_load_never_dispatches() {
    let mut s = VizijScroll::new(JsValue::UNDEFINED).unwrap();
    s.model_failed("404".into());
    s.scroll(500.0, 1100.0, 100.0).unwrap();
    for _ in 0..3 {
        let p: Payload = swb::from_value(s.tick().unwrap()).unwrap();
        assert!(!p.frame.dispatched);
    }
}

#[wasm_bindgen_test]
fn resize_sets_aspect() {
    let mut s = VizijScroll::new(JsValue::UNDEFINED).unwrap();
    s.resize(1600.0, 800.0);
    assert_eq!(s.aspect(), 2.0);
}

#[wasm_bindgen_test]
fn tick_payload_carries_viewport() {
    let mut s = VizijScroll::new(JsValue::UNDEFINED).unwrap();
    s.resize(1000.0, 500.0);
    let p: Payload = swb::from_value(s.tick().unwrap()).unwrap();
    assert_eq!(p.viewport.camera.aspect, 2.0);
    assert_eq!(p.viewport.width, 1000.0);
}

#[wasm_bindgen_test]
fn render_callback_may_call_back_into_showcase() {
    let s = Rc::new(VizijScroll::new(JsValue::UNDEFINED).unwrap());
    s.end_interaction();
    let seen = Rc::new(Cell::new(0.0_f32));

    let cb = {
        let s = s.clone();
        let seen = seen.clone();
        Closure::wrap(Box::new(move |_payload: JsValue| {
            seen.set(s.aspect());
            s.end_interaction();
            assert!(s.scene().is_ok());
        }) as Box<dyn FnMut(JsValue)>)
    };
    let render: &Function = cb.as_ref().unchecked_ref();
    s.frame(render).unwrap();
    s.frame(render).unwrap();
    assert_eq!(seen.get(), 1280.0 / 720.0);
}

#[wasm_bindgen_test]
fn physical_size_follows_pixel_ratio() {
    let mut s = VizijScroll::new(JsValue::UNDEFINED).unwrap();
    s.resize(800.0, 600.0);
    s.set_pixel_ratio(2.0);
    assert_eq!(s.physical_size(), vec![1600, 1200]);
}

#[wasm_bindgen_test]
fn document_scroll_offset_is_read_from_window() {
    let doc = dom::document().unwrap();
    let win = dom::window().unwrap();
    let m = dom::scroll_metrics(&doc);
    assert_eq!(m.document_scroll_top, win.scroll_y().unwrap() as f32);
}
