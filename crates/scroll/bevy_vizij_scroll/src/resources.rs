use bevy::prelude::*;
use vizij_scroll_core::{
    CaptionTable, Config, ModelStatus, SceneState, ScrollMetrics, ScrollTracker, Timeline,
    Viewport,
};

/// Timeline evaluated each frame once the model is ready.
#[derive(Resource, Debug, Clone)]
pub struct ScrollTimeline(pub Timeline);

/// Single writer of the scroll percentage.
#[derive(Resource, Debug, Default)]
pub struct ScrollState(pub ScrollTracker);

/// Scene handle the timeline writes into; copied onto ECS objects afterwards.
#[derive(Resource, Debug, Clone, Default)]
pub struct ScrollScene(pub SceneState);

#[derive(Resource, Debug, Clone)]
pub struct CaptionRules(pub CaptionTable);

/// Latest caption opacities, recomputed on every scroll event.
#[derive(Resource, Debug, Clone, Default)]
pub struct CaptionOpacities(pub Vec<f32>);

/// Development overlay text; `None` outside development mode.
#[derive(Resource, Debug, Clone, Default)]
pub struct ScrollOverlay(pub Option<String>);

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ModelLoadState(pub ModelStatus);

impl ModelLoadState {
    pub fn is_ready(&self) -> bool {
        self.0 == ModelStatus::Ready
    }
}

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ScrollViewport(pub Viewport);

/// Timeline entries applied on the most recent frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct LastDispatch(pub Vec<usize>);

#[derive(Resource, Debug, Clone, Default)]
pub struct ScrollSettings(pub Config);

/// Host scroll input. Browser hosts forward document metrics; native hosts
/// derive them from a [`VirtualPage`].
#[derive(Event, Debug, Clone, Copy)]
pub struct ScrollInput(pub ScrollMetrics);

/// Orbit drag ended; the camera snaps back to its initial pose.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct InteractionEnded;

/// Scrollable page emulated for native windows: mouse wheel moves
/// `scroll_top` within `[0, height - client_height]`.
#[derive(Resource, Debug, Clone, Copy)]
pub struct VirtualPage {
    pub scroll_top: f32,
    /// Page height as a multiple of the window height.
    pub pages: f32,
    pub client_height: f32,
    /// Pixels per wheel line.
    pub line_height: f32,
}

impl Default for VirtualPage {
    fn default() -> Self {
        Self {
            scroll_top: 0.0,
            pages: 6.0,
            client_height: 720.0,
            line_height: 40.0,
        }
    }
}

impl VirtualPage {
    pub fn scroll_height(&self) -> f32 {
        self.client_height * self.pages
    }

    /// Move by `dy` pixels, clamped to the scrollable range.
    pub fn scroll_by(&mut self, dy: f32) {
        let max = (self.scroll_height() - self.client_height).max(0.0);
        self.scroll_top = (self.scroll_top + dy).clamp(0.0, max);
    }

    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics::new(self.scroll_top, self.scroll_height(), self.client_height)
    }
}
