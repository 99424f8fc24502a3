//! Built-in helmet showcase: scroll timeline and lighting rig.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use serde::{Deserialize, Serialize};

use crate::timeline::{Channel, Effect, EffectOp, Flag, Timeline, TimelineEntry};

fn set(channel: Channel, value: f32) -> EffectOp {
    EffectOp::Set { channel, value }
}

fn lerp(channel: Channel, from: f32, to: f32) -> EffectOp {
    EffectOp::Lerp { channel, from, to }
}

fn flag(value: bool) -> EffectOp {
    EffectOp::Flag {
        flag: Flag::Controls,
        value,
    }
}

/// The nine-segment helmet timeline covering `[0, 101)`.
///
/// Caption-only segments (`build`, `neural`) are holds.
pub fn timeline() -> Timeline {
    use Channel::*;

    let entries = [
        (
            0.0,
            5.0,
            "title",
            vec![
                set(PositionX, 1.0),
                set(PositionY, 0.0),
                set(RotationY, -FRAC_PI_4),
            ],
        ),
        (
            5.0,
            25.0,
            "title-to-build",
            vec![
                lerp(PositionZ, 0.0, 1.0),
                lerp(PositionX, 1.0, -1.0),
                lerp(RotationY, -FRAC_PI_4, FRAC_PI_2),
            ],
        ),
        (25.0, 30.0, "build", vec![]),
        (
            30.0,
            50.0,
            "build-to-visor",
            vec![
                lerp(RotationY, FRAC_PI_2, 0.0),
                lerp(PositionX, -1.0, 0.0),
                lerp(Emissive, -1.0, 1.0),
                set(Spotlight, 0.0),
            ],
        ),
        (50.0, 55.0, "visor", vec![set(Spotlight, 3.0)]),
        (
            55.0,
            75.0,
            "visor-to-neural",
            vec![
                lerp(RotationX, 0.0, -FRAC_PI_4),
                lerp(RotationY, 0.0, 3.0 * PI / 4.0),
            ],
        ),
        (75.0, 80.0, "neural", vec![]),
        (
            80.0,
            90.0,
            "neural-to-interact",
            vec![
                lerp(RotationX, -FRAC_PI_4, 0.0),
                lerp(RotationY, 3.0 * PI / 4.0, -FRAC_PI_4),
                flag(false),
            ],
        ),
        // Runs past 100 so the very bottom of the page stays in range.
        (90.0, 101.0, "interact", vec![flag(true)]),
    ];

    let mut timeline = Timeline::new();
    for (start, end, label, ops) in entries {
        timeline
            .push(TimelineEntry::new(start, end, Effect::Ops(ops)).labeled(label))
            .expect("showcase ranges are finite and non-empty");
    }
    timeline
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub color: u32,
    pub intensity: f32,
    pub position: [f32; 3],
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub color: u32,
    pub intensity: f32,
    pub position: [f32; 3],
    pub cast_shadow: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HemisphereLight {
    pub sky: u32,
    pub ground: u32,
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub color: u32,
    pub intensity: f32,
}

/// Static lights and background. The spotlight's intensity is driven by the
/// timeline; `spotlight.intensity` here is its starting value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseRig {
    pub background: u32,
    pub directional: DirectionalLight,
    pub points: Vec<PointLight>,
    pub spotlight: PointLight,
    pub ambient: AmbientLight,
    pub hemisphere: HemisphereLight,
    pub camera_position: [f32; 3],
}

impl Default for ShowcaseRig {
    fn default() -> Self {
        let warm = |position| PointLight {
            color: 0xffffaa,
            intensity: 0.5,
            position,
        };
        Self {
            background: 0x050505,
            directional: DirectionalLight {
                color: 0xffffff,
                intensity: 1.0,
                position: [0.0, 1.0, 0.0],
                cast_shadow: true,
            },
            points: vec![
                warm([0.0, 1.0, 5.0]),
                warm([5.0, 1.0, 0.0]),
                warm([-5.0, 3.0, 0.0]),
                warm([0.0, 3.0, 5.0]),
            ],
            spotlight: PointLight {
                color: 0xffffff,
                intensity: 0.0,
                position: [0.0, 5.0, 0.0],
            },
            ambient: AmbientLight {
                color: 0x7c7c7c,
                intensity: 1.0,
            },
            hemisphere: HemisphereLight {
                sky: 0x0000ff,
                ground: 0x00ff00,
                intensity: 0.5,
            },
            camera_position: [0.0, 0.0, 3.0],
        }
    }
}

/// Split a `0xRRGGBB` color into normalized sRGB components.
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
