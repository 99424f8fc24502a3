use bevy::prelude::*;

/// Marker for the model root whose transform follows the timeline pose.
#[derive(Component, Debug, Default)]
pub struct ScrollModel;

/// Marker for mesh materials under a [`ScrollModel`]; their emissive color
/// follows the timeline.
#[derive(Component, Debug, Default)]
pub struct ModelMaterial;

/// The spotlight whose intensity the timeline drives.
/// `lumens_per_unit` converts timeline intensity into Bevy lumens.
#[derive(Component, Debug, Clone, Copy)]
pub struct ShowcaseSpotlight {
    pub lumens_per_unit: f32,
}

impl Default for ShowcaseSpotlight {
    fn default() -> Self {
        Self {
            lumens_per_unit: 100_000.0,
        }
    }
}

/// Camera driven by the scene's camera rig.
#[derive(Component, Debug, Default)]
pub struct ShowcaseCamera;

/// UI text for caption `index` in the caption table.
#[derive(Component, Debug, Clone, Copy)]
pub struct CaptionText(pub usize);

/// Development scroll overlay text.
#[derive(Component, Debug, Default)]
pub struct ScrollOverlayText;
