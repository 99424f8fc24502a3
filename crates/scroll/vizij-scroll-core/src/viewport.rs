//! Render surface size and camera projection.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveCamera {
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Surface size in CSS pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
    pub camera: PerspectiveCamera,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        let mut vp = Self {
            width,
            height,
            pixel_ratio,
            camera: PerspectiveCamera::default(),
        };
        vp.camera.aspect = width / height;
        vp
    }

    /// Apply a window resize: new surface size and `aspect = width / height`.
    /// Nothing else changes.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.camera.aspect = width / height;
    }

    /// Backing-store size in device pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).round().max(0.0) as u32,
            (self.height * self.pixel_ratio).round().max(0.0) as u32,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_updates_aspect_and_size_only() {
        let mut vp = Viewport::new(800.0, 600.0, 2.0);
        let before = vp;
        vp.resize(1920.0, 1080.0);
        assert_eq!(vp.width, 1920.0);
        assert_eq!(vp.height, 1080.0);
        assert_eq!(vp.camera.aspect, 1920.0 / 1080.0);
        assert_eq!(vp.pixel_ratio, before.pixel_ratio);
        assert_eq!(vp.camera.fov_deg, before.camera.fov_deg);
        assert_eq!(vp.camera.near, before.camera.near);
        assert_eq!(vp.camera.far, before.camera.far);
    }

    #[test]
    fn physical_size_scales_by_pixel_ratio() {
        assert_eq!(Viewport::new(800.0, 600.0, 2.0).physical_size(), (1600, 1200));
    }
}
