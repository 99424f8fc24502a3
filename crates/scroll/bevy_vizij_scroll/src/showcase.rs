//! Scene setup for the helmet showcase: camera, lights, model and captions.
//! Needs the asset, PBR and UI plugins (e.g. `DefaultPlugins`).

use bevy::asset::LoadState;
use bevy::prelude::*;
use vizij_scroll_core::showcase::{hex_to_rgb, ShowcaseRig};
use vizij_scroll_core::ModelStatus;

use crate::components::{
    CaptionText, ScrollModel, ScrollOverlayText, ShowcaseCamera, ShowcaseSpotlight,
};
use crate::resources::{ModelLoadState, ScrollSettings};

/// Lumens per unit of timeline point-light intensity.
const POINT_LUMENS_PER_UNIT: f32 = 100_000.0;
/// Lux per unit of directional-light intensity.
const LUX_PER_UNIT: f32 = 2_000.0;
/// Ambient brightness per unit of intensity.
const AMBIENT_PER_UNIT: f32 = 300.0;

/// Default caption copy, one line per caption.
pub const CAPTION_COPY: [&str; 5] = [
    "Damaged Helmet",
    "Build",
    "Visor",
    "Neural Interface",
    "Interact",
];

#[derive(Resource, Debug, Clone)]
pub struct ModelHandle(pub Handle<Scene>);

fn color(hex: u32) -> Color {
    let [r, g, b] = hex_to_rgb(hex);
    Color::srgb(r, g, b)
}

pub fn setup_showcase_system(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<ScrollSettings>,
) {
    let cfg = &settings.0;
    let rig: &ShowcaseRig = &cfg.rig;

    commands.insert_resource(ClearColor(color(rig.background)));
    commands.insert_resource(AmbientLight {
        color: color(rig.ambient.color),
        brightness: rig.ambient.intensity * AMBIENT_PER_UNIT,
    });

    let [cx, cy, cz] = rig.camera_position;
    commands.spawn((
        Camera3dBundle {
            projection: PerspectiveProjection {
                fov: 75.0_f32.to_radians(),
                near: 0.1,
                far: 1000.0,
                ..default()
            }
            .into(),
            transform: Transform::from_xyz(cx, cy, cz).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        ShowcaseCamera,
    ));

    let d = rig.directional;
    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            color: color(d.color),
            illuminance: d.intensity * LUX_PER_UNIT,
            shadows_enabled: d.cast_shadow,
            ..default()
        },
        transform: Transform::from_translation(Vec3::from_array(d.position))
            .looking_at(Vec3::ZERO, Vec3::Z),
        ..default()
    });

    for p in &rig.points {
        commands.spawn(PointLightBundle {
            point_light: PointLight {
                color: color(p.color),
                intensity: p.intensity * POINT_LUMENS_PER_UNIT,
                ..default()
            },
            transform: Transform::from_translation(Vec3::from_array(p.position)),
            ..default()
        });
    }

    let spot_cfg = ShowcaseSpotlight::default();
    commands.spawn((
        SpotLightBundle {
            spot_light: SpotLight {
                color: color(rig.spotlight.color),
                intensity: rig.spotlight.intensity * spot_cfg.lumens_per_unit,
                ..default()
            },
            transform: Transform::from_translation(Vec3::from_array(rig.spotlight.position))
                .looking_at(Vec3::ZERO, Vec3::Z),
            ..default()
        },
        spot_cfg,
    ));
    // Bevy has no hemisphere light; the rig's hemisphere term is left to web hosts.

    let handle: Handle<Scene> = asset_server.load(format!("{}#Scene0", cfg.model_path));
    commands.insert_resource(ModelHandle(handle.clone()));
    commands.spawn((
        SceneBundle {
            scene: handle,
            ..default()
        },
        ScrollModel,
        Name::new("ScrollModel"),
    ));

    for (idx, copy) in CAPTION_COPY.iter().enumerate().take(cfg.captions.len()) {
        commands.spawn((
            TextBundle::from_section(
                *copy,
                TextStyle {
                    font_size: 48.0,
                    color: Color::WHITE,
                    ..default()
                },
            )
            .with_style(Style {
                position_type: PositionType::Absolute,
                left: Val::Percent(8.0),
                top: Val::Percent(40.0),
                ..default()
            }),
            CaptionText(idx),
        ));
    }

    if cfg.development {
        commands.spawn((
            TextBundle::from_section(
                "Scroll Progress : 0.00",
                TextStyle {
                    font_size: 18.0,
                    color: Color::WHITE,
                    ..default()
                },
            )
            .with_style(Style {
                position_type: PositionType::Absolute,
                right: Val::Px(12.0),
                top: Val::Px(12.0),
                ..default()
            }),
            ScrollOverlayText,
        ));
    }
}

/// Poll the asset server until the model settles. Failure is logged once and
/// never retried; the empty scene keeps rendering.
pub fn track_model_load_system(
    server: Res<AssetServer>,
    handle: Option<Res<ModelHandle>>,
    mut state: ResMut<ModelLoadState>,
) {
    if state.0 != ModelStatus::Pending {
        return;
    }
    let Some(handle) = handle else {
        return;
    };
    match server.get_load_state(&handle.0) {
        Some(LoadState::Loaded) => {
            info!("model loaded");
            state.0 = ModelStatus::Ready;
        }
        Some(LoadState::Failed(err)) => {
            error!("model load failed: {err}");
            state.0 = ModelStatus::Failed(err.to_string());
        }
        _ => {}
    }
}

/// Development grid on the ground plane (10 units, 10 divisions).
pub fn grid_gizmo_system(mut gizmos: Gizmos) {
    let c = color(0xaec6cf);
    let half = 5.0;
    for i in 0..=10 {
        let t = -half + i as f32;
        gizmos.line(Vec3::new(t, 0.0, -half), Vec3::new(t, 0.0, half), c);
        gizmos.line(Vec3::new(-half, 0.0, t), Vec3::new(half, 0.0, t), c);
    }
}
