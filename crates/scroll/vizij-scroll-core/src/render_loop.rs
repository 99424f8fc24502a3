//! Per-frame driver.
//!
//! The host calls [`RenderLoop::tick`] once per display refresh and forwards
//! scroll and resize events. Dispatch is gated on the model having loaded;
//! rendering is not.

use serde::{Deserialize, Serialize};

use crate::captions::CaptionTable;
use crate::config::Config;
use crate::load::{LoadSender, ModelLoad, ModelStatus};
use crate::scene::{CameraRig, SceneState};
use crate::showcase;
use crate::timeline::{Dispatch, Timeline};
use crate::tracker::{ScrollMetrics, ScrollProgress, ScrollTracker};
use crate::viewport::Viewport;

/// Receives the scene once per frame. Rasterization belongs to the host.
pub trait FrameSink {
    fn render(&mut self, scene: &SceneState, frame: &Frame);
}

impl<F> FrameSink for F
where
    F: FnMut(&SceneState, &Frame),
{
    fn render(&mut self, scene: &SceneState, frame: &Frame) {
        self(scene, frame)
    }
}

/// Summary of one tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub index: u64,
    pub progress: ScrollProgress,
    /// Whether the dispatcher ran (model loaded).
    pub dispatched: bool,
    /// Timeline entries applied this frame.
    pub fired: Vec<usize>,
}

/// Result of a scroll event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollUpdate {
    pub progress: ScrollProgress,
    pub opacities: Vec<f32>,
    /// First visible caption, if any.
    pub caption: Option<usize>,
    /// Development overlay text, only in development mode.
    pub overlay: Option<String>,
}

#[derive(Debug)]
pub struct RenderLoop {
    timeline: Timeline,
    captions: CaptionTable,
    scene: SceneState,
    tracker: ScrollTracker,
    viewport: Viewport,
    model: ModelLoad,
    frames: u64,
    development: bool,
}

impl RenderLoop {
    pub fn new(config: &Config, timeline: Timeline, model: ModelLoad) -> Self {
        let scene = SceneState {
            camera: CameraRig::new(config.rig.camera_position),
            spotlight_intensity: config.rig.spotlight.intensity,
            ..SceneState::default()
        };
        Self {
            timeline,
            captions: config.captions.clone(),
            scene,
            tracker: ScrollTracker::new(),
            viewport: Viewport::default(),
            model,
            frames: 0,
            development: config.development,
        }
    }

    /// Showcase timeline with a fresh load slot. The returned sender belongs
    /// to whatever loads the model.
    pub fn showcase(config: &Config) -> (LoadSender, Self) {
        let (tx, slot) = ModelLoad::channel();
        (tx, Self::new(config, showcase::timeline(), slot))
    }

    pub fn on_scroll(&mut self, metrics: &ScrollMetrics) -> ScrollUpdate {
        let progress = self.tracker.on_scroll(metrics);
        self.update_for(progress)
    }

    /// Back to the top of the page, as on startup.
    pub fn reset_scroll(&mut self) -> ScrollUpdate {
        self.tracker.reset();
        self.update_for(self.tracker.progress())
    }

    fn update_for(&self, progress: ScrollProgress) -> ScrollUpdate {
        ScrollUpdate {
            progress,
            opacities: self.captions.opacities(progress),
            caption: self.captions.visible(progress),
            overlay: self.development.then(|| progress.debug_label()),
        }
    }

    /// Run one frame: poll the model load, dispatch if loaded, then render.
    pub fn tick<S: FrameSink + ?Sized>(&mut self, sink: &mut S) -> Frame {
        self.frames = self.frames.wrapping_add(1);
        let progress = self.tracker.progress();
        let dispatch = match self.model.poll() {
            ModelStatus::Ready => Some(self.timeline.dispatch(progress.percent, &mut self.scene)),
            ModelStatus::Pending | ModelStatus::Failed(_) => None,
        };
        let frame = Frame {
            index: self.frames,
            progress,
            dispatched: dispatch.is_some(),
            fired: dispatch.map(|Dispatch { fired }| fired).unwrap_or_default(),
        };
        sink.render(&self.scene, &frame);
        frame
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
    }

    pub fn set_pixel_ratio(&mut self, pixel_ratio: f32) {
        self.viewport.pixel_ratio = pixel_ratio;
    }

    /// Orbit drag finished: snap the camera back.
    pub fn end_interaction(&mut self) {
        self.scene.camera.end_interaction();
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneState {
        &mut self.scene
    }

    pub fn progress(&self) -> ScrollProgress {
        self.tracker.progress()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn model_status(&self) -> &ModelStatus {
        self.model.status()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn captions(&self) -> &CaptionTable {
        &self.captions
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
