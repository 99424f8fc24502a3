use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use vizij_scroll_core::{
    Config, Frame, LoadSender, RenderLoop, SceneState, ScrollMetrics, ScrollUpdate, Viewport,
};

pub mod dom;

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// What a JS render callback receives each frame.
#[derive(Serialize)]
struct FramePayload<'a> {
    frame: &'a Frame,
    scene: &'a SceneState,
    viewport: Viewport,
}

/// Run one tick and serialize `{ frame, scene, viewport }`. The loop is
/// released before returning so JS may call back into the showcase.
fn tick_payload(core: &RefCell<RenderLoop>) -> Result<JsValue, JsError> {
    let mut core = core.borrow_mut();
    let viewport = *core.viewport();
    let mut out = None;
    core.tick(&mut |scene: &SceneState, frame: &Frame| {
        out = Some(swb::to_value(&FramePayload {
            frame,
            scene,
            viewport,
        }));
    });
    match out {
        Some(Ok(v)) => Ok(v),
        Some(Err(e)) => Err(JsError::new(&format!("frame serialize error: {e}"))),
        None => Ok(JsValue::UNDEFINED),
    }
}

/// Tick, then hand the payload to `render`.
fn render_frame(core: &RefCell<RenderLoop>, render: &Function) -> Result<(), JsValue> {
    let payload = tick_payload(core).map_err(JsValue::from)?;
    render.call1(&JsValue::UNDEFINED, &payload)?;
    Ok(())
}

#[wasm_bindgen]
pub struct VizijScroll {
    core: Rc<RefCell<RenderLoop>>,
    loader: LoadSender,
    config: Config,
}

#[wasm_bindgen]
impl VizijScroll {
    /// Create a showcase. Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new VizijScroll({ development: true })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<VizijScroll, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let level = if cfg.development {
            log::Level::Debug
        } else {
            log::Level::Info
        };
        // A second showcase on the same page keeps the first logger.
        let _ = console_log::init_with_level(level);

        let (loader, core) = RenderLoop::showcase(&cfg);
        Ok(VizijScroll {
            core: Rc::new(RefCell::new(core)),
            loader,
            config: cfg,
        })
    }

    /// Relative path of the model the host should load.
    #[wasm_bindgen(getter)]
    pub fn model_path(&self) -> String {
        self.config.model_path.clone()
    }

    /// Caption element ids in table order.
    #[wasm_bindgen(js_name = caption_ids)]
    pub fn caption_ids(&self) -> Vec<String> {
        self.config
            .captions
            .captions
            .iter()
            .map(|c| c.id.clone())
            .collect()
    }

    /// Feed raw scroll offsets. Returns `{ progress, opacities, caption, overlay }`.
    #[wasm_bindgen]
    pub fn scroll(
        &mut self,
        scroll_top: f32,
        scroll_height: f32,
        client_height: f32,
    ) -> Result<JsValue, JsError> {
        let update = self
            .core
            .borrow_mut()
            .on_scroll(&ScrollMetrics::new(scroll_top, scroll_height, client_height));
        to_js(&update)
    }

    /// Feed a `ScrollMetrics` object (document and body values).
    #[wasm_bindgen(js_name = scroll_metrics)]
    pub fn scroll_metrics(&mut self, metrics: JsValue) -> Result<JsValue, JsError> {
        let m: ScrollMetrics =
            swb::from_value(metrics).map_err(|e| JsError::new(&format!("metrics error: {e}")))?;
        let update = self.core.borrow_mut().on_scroll(&m);
        to_js(&update)
    }

    /// Read scroll offsets from the page, update captions and the overlay.
    #[wasm_bindgen(js_name = handle_document_scroll)]
    pub fn handle_document_scroll(&mut self) -> Result<JsValue, JsError> {
        let doc = dom::document().map_err(js_error)?;
        let update = sync_document(&self.core, &self.config, &doc);
        to_js(&update)
    }

    /// Run one frame and return `{ frame, scene, viewport }`.
    #[wasm_bindgen]
    pub fn tick(&mut self) -> Result<JsValue, JsError> {
        tick_payload(&self.core)
    }

    /// Run one frame and call `render({ frame, scene, viewport })`. The
    /// callback may read from or call back into this object.
    #[wasm_bindgen]
    pub fn frame(&self, render: &Function) -> Result<(), JsValue> {
        render_frame(&self.core, render)
    }

    #[wasm_bindgen]
    pub fn resize(&mut self, width: f32, height: f32) {
        self.core.borrow_mut().resize(width, height);
    }

    #[wasm_bindgen(js_name = set_pixel_ratio)]
    pub fn set_pixel_ratio(&mut self, ratio: f32) {
        self.core.borrow_mut().set_pixel_ratio(ratio);
    }

    /// Aspect ratio of the camera after the latest resize.
    #[wasm_bindgen(getter)]
    pub fn aspect(&self) -> f32 {
        self.core.borrow().viewport().camera.aspect
    }

    /// Backing-store size `[width, height]` in device pixels.
    #[wasm_bindgen(js_name = physical_size)]
    pub fn physical_size(&self) -> Vec<u32> {
        let (w, h) = self.core.borrow().viewport().physical_size();
        vec![w, h]
    }

    #[wasm_bindgen(getter)]
    pub fn progress(&self) -> f32 {
        self.core.borrow().progress().percent
    }

    #[wasm_bindgen(js_name = model_progress)]
    pub fn model_progress(&self, loaded: f64, total: f64) {
        self.loader.progress(loaded as u64, total as u64);
    }

    #[wasm_bindgen(js_name = model_loaded)]
    pub fn model_loaded(&self) {
        self.loader.finish();
    }

    #[wasm_bindgen(js_name = model_failed)]
    pub fn model_failed(&self, reason: String) {
        self.loader.fail(reason);
    }

    /// Orbit drag ended: camera snaps back to its initial pose.
    #[wasm_bindgen(js_name = end_interaction)]
    pub fn end_interaction(&self) {
        self.core.borrow_mut().end_interaction();
    }

    #[wasm_bindgen]
    pub fn scene(&self) -> Result<JsValue, JsError> {
        to_js(self.core.borrow().scene())
    }

    /// Wire the page: scroll and resize listeners plus a self-rescheduling
    /// animation frame loop calling `render({ frame, scene, viewport })`.
    /// Runs for the lifetime of the page.
    #[wasm_bindgen]
    pub fn attach(&self, render: Function) -> Result<(), JsValue> {
        let win = dom::window()?;
        let doc = dom::document()?;

        let (w, h) = dom::inner_size(&win)?;
        {
            let mut core = self.core.borrow_mut();
            core.resize(w, h);
            core.set_pixel_ratio(win.device_pixel_ratio() as f32);
        }

        let on_scroll = {
            let core = self.core.clone();
            let config = self.config.clone();
            let doc = doc.clone();
            Closure::wrap(Box::new(move || {
                sync_document(&core, &config, &doc);
            }) as Box<dyn FnMut()>)
        };
        win.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
        on_scroll.forget();

        let on_resize = {
            let core = self.core.clone();
            let win = win.clone();
            Closure::wrap(Box::new(move || match dom::inner_size(&win) {
                Ok((w, h)) => core.borrow_mut().resize(w, h),
                Err(e) => log::error!("resize: {:?}", e),
            }) as Box<dyn FnMut()>)
        };
        win.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        on_resize.forget();

        // `f` holds the frame closure so it can reschedule itself.
        let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();
        let core = self.core.clone();
        let frame_win = win.clone();
        *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Err(e) = render_frame(&core, &render) {
                log::error!("render callback failed: {:?}", e);
            }
            if let Some(cb) = f.borrow().as_ref() {
                if let Err(e) = frame_win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    log::error!("request_animation_frame failed: {:?}", e);
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(cb) = g.borrow().as_ref() {
            win.request_animation_frame(cb.as_ref().unchecked_ref())?;
        }

        dom::scroll_to_top(&win);
        let update = self.core.borrow_mut().reset_scroll();
        apply_update(&doc, &self.config, &update);
        Ok(())
    }
}

fn sync_document(
    core: &Rc<RefCell<RenderLoop>>,
    config: &Config,
    doc: &web_sys::Document,
) -> ScrollUpdate {
    let metrics = dom::scroll_metrics(doc);
    let update = core.borrow_mut().on_scroll(&metrics);
    apply_update(doc, config, &update);
    update
}

fn apply_update(doc: &web_sys::Document, config: &Config, update: &ScrollUpdate) {
    dom::apply_captions(doc, &config.captions, &update.opacities);
    if let Some(text) = update.overlay.as_deref() {
        dom::set_overlay_text(doc, &config.overlay_id, text);
    }
}

fn to_js<T: Serialize + ?Sized>(v: &T) -> Result<JsValue, JsError> {
    swb::to_value(v).map_err(|e| JsError::new(&format!("serialize error: {e}")))
}

fn js_error(e: JsValue) -> JsError {
    JsError::new(&format!("{:?}", e))
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
