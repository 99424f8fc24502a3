//! Bevy integration for the Vizij scroll showcase.
//!
//! [`VizijScrollPlugin`] owns the scroll tracker, timeline and caption state
//! and copies the posed scene onto tagged entities each frame. It works with
//! `MinimalPlugins`. [`VizijShowcasePlugin`] adds the helmet scene, model
//! loading and mouse-wheel scrolling on top and needs `DefaultPlugins`.

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::WindowResized;
use vizij_scroll_core::{showcase as preset, Config, ScrollProgress, Timeline};

pub mod components;
pub mod resources;
pub mod showcase;
pub mod systems;

pub use components::{
    CaptionText, ModelMaterial, ScrollModel, ScrollOverlayText, ShowcaseCamera, ShowcaseSpotlight,
};
pub use resources::{
    CaptionOpacities, CaptionRules, InteractionEnded, LastDispatch, ModelLoadState, ScrollInput,
    ScrollOverlay, ScrollScene, ScrollSettings, ScrollState, ScrollTimeline, ScrollViewport,
    VirtualPage,
};

/// Ordering of the per-frame work.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScrollSet {
    /// Scroll, resize and interaction input.
    Input,
    /// Timeline dispatch (gated on model load).
    Dispatch,
    /// Copy scene state onto ECS objects.
    Apply,
}

pub struct VizijScrollPlugin {
    pub config: Config,
    pub timeline: Timeline,
}

impl Default for VizijScrollPlugin {
    fn default() -> Self {
        Self {
            config: Config::default(),
            timeline: preset::timeline(),
        }
    }
}

impl Plugin for VizijScrollPlugin {
    fn build(&self, app: &mut App) {
        let scene = vizij_scroll_core::SceneState {
            camera: vizij_scroll_core::CameraRig::new(self.config.rig.camera_position),
            spotlight_intensity: self.config.rig.spotlight.intensity,
            ..Default::default()
        };
        let opacities = self.config.captions.opacities(ScrollProgress::default());
        app.insert_resource(ScrollSettings(self.config.clone()))
            .insert_resource(ScrollTimeline(self.timeline.clone()))
            .insert_resource(CaptionRules(self.config.captions.clone()))
            .insert_resource(ScrollScene(scene))
            .insert_resource(CaptionOpacities(opacities))
            .init_resource::<ScrollState>()
            .init_resource::<ScrollOverlay>()
            .init_resource::<ModelLoadState>()
            .init_resource::<ScrollViewport>()
            .init_resource::<LastDispatch>()
            .add_event::<ScrollInput>()
            .add_event::<InteractionEnded>()
            .add_event::<WindowResized>()
            .add_systems(Startup, systems::reset_scroll_system)
            .configure_sets(
                Update,
                (ScrollSet::Input, ScrollSet::Dispatch, ScrollSet::Apply).chain(),
            )
            .add_systems(
                Update,
                (
                    systems::ingest_scroll_system,
                    systems::resize_system,
                    systems::interaction_ended_system,
                )
                    .in_set(ScrollSet::Input),
            )
            .add_systems(
                Update,
                systems::dispatch_timeline_system
                    .run_if(systems::model_ready)
                    .in_set(ScrollSet::Dispatch),
            )
            .add_systems(
                Update,
                (
                    systems::tag_model_materials_system,
                    systems::apply_scene_system,
                    systems::apply_emissive_system,
                    systems::caption_visibility_system,
                    systems::overlay_text_system,
                )
                    .chain()
                    .in_set(ScrollSet::Apply),
            );
    }
}

/// Helmet scene, asset loading and mouse-wheel scrolling.
#[derive(Default)]
pub struct VizijShowcasePlugin {
    pub config: Config,
}

impl Plugin for VizijShowcasePlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<VizijScrollPlugin>() {
            app.add_plugins(VizijScrollPlugin {
                config: self.config.clone(),
                timeline: preset::timeline(),
            });
        }
        app.init_resource::<VirtualPage>()
            .add_event::<MouseWheel>()
            .add_systems(Startup, showcase::setup_showcase_system)
            .add_systems(
                Update,
                (
                    showcase::track_model_load_system.before(ScrollSet::Dispatch),
                    systems::wheel_scroll_system.before(ScrollSet::Input),
                ),
            );
        if self.config.development {
            app.add_systems(Update, showcase::grid_gizmo_system);
        }
    }
}
