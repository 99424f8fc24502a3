//! Mutable scene state driven by the timeline.
//!
//! The renderer owns the real scene graph; this struct is the handle the
//! dispatcher writes into and adapters copy onto their engine objects.

use serde::{Deserialize, Serialize};

/// Orbit-control state. Input handling lives in the host; the timeline only
/// flips `enabled`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitControls {
    pub enabled: bool,
    pub zoom_enabled: bool,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enabled: false,
            zoom_enabled: false,
        }
    }
}

/// Camera placement plus the pose it snaps back to after user interaction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    pub position: [f32; 3],
    pub initial_position: [f32; 3],
    /// Point the camera looks at after a reset.
    pub target: [f32; 3],
}

impl CameraRig {
    pub fn new(initial_position: [f32; 3]) -> Self {
        Self {
            position: initial_position,
            initial_position,
            target: [0.0, 0.0, 0.0],
        }
    }

    /// Called when an orbit drag ends: restore the initial position and look
    /// at the scene origin.
    pub fn end_interaction(&mut self) {
        self.position = self.initial_position;
        self.target = [0.0, 0.0, 0.0];
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new([0.0, 0.0, 3.0])
    }
}

/// Everything a timeline effect may touch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    /// Model translation.
    pub position: [f32; 3],
    /// Model rotation as XYZ Euler angles (radians).
    pub rotation: [f32; 3],
    /// Emissive color applied to the model material (linear RGB, unclamped).
    pub emissive: [f32; 3],
    pub spotlight_intensity: f32,
    pub controls: OrbitControls,
    pub camera: CameraRig,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            emissive: [0.0; 3],
            spotlight_intensity: 0.0,
            controls: OrbitControls::default(),
            camera: CameraRig::default(),
        }
    }
}

impl SceneState {
    /// Set all emissive components to the same grey level.
    pub fn set_emissive_grey(&mut self, level: f32) {
        self.emissive = [level, level, level];
    }
}
