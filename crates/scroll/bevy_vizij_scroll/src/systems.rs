use bevy::hierarchy::HierarchyQueryExt;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::WindowResized;

use crate::components::{
    CaptionText, ModelMaterial, ScrollModel, ScrollOverlayText, ShowcaseCamera, ShowcaseSpotlight,
};
use crate::resources::{
    CaptionOpacities, CaptionRules, InteractionEnded, LastDispatch, ModelLoadState, ScrollInput,
    ScrollOverlay, ScrollScene, ScrollSettings, ScrollState, ScrollTimeline, ScrollViewport,
    VirtualPage,
};

/// Run condition: the dispatcher only runs once the model has loaded.
pub fn model_ready(state: Res<ModelLoadState>) -> bool {
    state.is_ready()
}

/// Fold scroll events into the tracker and recompute caption opacities.
/// Every event overwrites the stored percentage.
pub fn ingest_scroll_system(
    mut events: EventReader<ScrollInput>,
    mut tracker: ResMut<ScrollState>,
    rules: Res<CaptionRules>,
    settings: Res<ScrollSettings>,
    mut opacities: ResMut<CaptionOpacities>,
    mut overlay: ResMut<ScrollOverlay>,
) {
    for ScrollInput(metrics) in events.read() {
        let progress = tracker.0.on_scroll(metrics);
        opacities.0 = rules.0.opacities(progress);
        if settings.0.development {
            overlay.0 = Some(progress.debug_label());
        }
    }
}

/// Startup: back to the top of the page, captions and overlay included.
pub fn reset_scroll_system(
    mut tracker: ResMut<ScrollState>,
    rules: Res<CaptionRules>,
    settings: Res<ScrollSettings>,
    mut opacities: ResMut<CaptionOpacities>,
    mut overlay: ResMut<ScrollOverlay>,
    page: Option<ResMut<VirtualPage>>,
) {
    tracker.0.reset();
    if let Some(mut page) = page {
        page.scroll_top = 0.0;
    }
    let progress = tracker.0.progress();
    opacities.0 = rules.0.opacities(progress);
    if settings.0.development {
        overlay.0 = Some(progress.debug_label());
    }
}

/// Apply every timeline entry whose range contains the current percentage.
pub fn dispatch_timeline_system(
    timeline: Res<ScrollTimeline>,
    tracker: Res<ScrollState>,
    mut scene: ResMut<ScrollScene>,
    mut last: ResMut<LastDispatch>,
) {
    let percent = tracker.0.progress().percent;
    let dispatch = timeline.0.dispatch(percent, &mut scene.0);
    last.0 = dispatch.fired;
}

pub fn interaction_ended_system(
    mut events: EventReader<InteractionEnded>,
    mut scene: ResMut<ScrollScene>,
) {
    if events.read().count() > 0 {
        scene.0.camera.end_interaction();
    }
}

/// Copy the scene state onto the model transform, camera and spotlight.
pub fn apply_scene_system(
    scene: Res<ScrollScene>,
    mut models: Query<&mut Transform, (With<ScrollModel>, Without<ShowcaseCamera>)>,
    mut cameras: Query<&mut Transform, (With<ShowcaseCamera>, Without<ScrollModel>)>,
    mut spots: Query<(&mut SpotLight, &ShowcaseSpotlight)>,
) {
    if !scene.is_changed() {
        return;
    }
    let s = &scene.0;
    for mut tf in models.iter_mut() {
        tf.translation = Vec3::from_array(s.position);
        tf.rotation = Quat::from_euler(EulerRot::XYZ, s.rotation[0], s.rotation[1], s.rotation[2]);
    }
    for mut tf in cameras.iter_mut() {
        let eye = Vec3::from_array(s.camera.position);
        *tf = Transform::from_translation(eye)
            .looking_at(Vec3::from_array(s.camera.target), Vec3::Y);
    }
    for (mut spot, cfg) in spots.iter_mut() {
        spot.intensity = s.spotlight_intensity * cfg.lumens_per_unit;
    }
}

/// Write the emissive color onto every tagged model material.
pub fn apply_emissive_system(
    scene: Res<ScrollScene>,
    handles: Query<&Handle<StandardMaterial>, With<ModelMaterial>>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    if !scene.is_changed() {
        return;
    }
    let Some(mut materials) = materials else {
        return;
    };
    let [r, g, b] = scene.0.emissive;
    for handle in handles.iter() {
        if let Some(mat) = materials.get_mut(handle) {
            mat.emissive = LinearRgba::rgb(r, g, b);
        }
    }
}

/// Tag materials that appear under a model root and reset their emissive
/// color to black.
pub fn tag_model_materials_system(
    mut commands: Commands,
    added: Query<(Entity, &Handle<StandardMaterial>), Added<Handle<StandardMaterial>>>,
    parents: Query<&Parent>,
    models: Query<(), With<ScrollModel>>,
    mut materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    for (entity, handle) in added.iter() {
        let under_model =
            models.contains(entity) || parents.iter_ancestors(entity).any(|a| models.contains(a));
        if !under_model {
            continue;
        }
        commands.entity(entity).insert(ModelMaterial);
        if let Some(mat) = materials.as_mut().and_then(|m| m.get_mut(handle)) {
            mat.emissive = LinearRgba::BLACK;
        }
    }
}

/// Window resize: new surface size and aspect ratio, nothing else.
pub fn resize_system(
    mut events: EventReader<WindowResized>,
    mut viewport: ResMut<ScrollViewport>,
    mut projections: Query<&mut Projection, With<ShowcaseCamera>>,
    page: Option<ResMut<VirtualPage>>,
) {
    let Some(last) = events.read().last() else {
        return;
    };
    viewport.0.resize(last.width, last.height);
    for mut projection in projections.iter_mut() {
        if let Projection::Perspective(p) = &mut *projection {
            p.aspect_ratio = viewport.0.camera.aspect;
        }
    }
    if let Some(mut page) = page {
        page.client_height = last.height;
        page.scroll_by(0.0);
    }
}

/// Native hosts: turn mouse wheel motion into virtual page scroll events.
pub fn wheel_scroll_system(
    mut wheel: EventReader<MouseWheel>,
    mut page: ResMut<VirtualPage>,
    mut out: EventWriter<ScrollInput>,
) {
    let mut moved = false;
    for ev in wheel.read() {
        let dy = match ev.unit {
            MouseScrollUnit::Line => ev.y * page.line_height,
            MouseScrollUnit::Pixel => ev.y,
        };
        // Wheel up (positive y) scrolls towards the top of the page.
        page.scroll_by(-dy);
        moved = true;
    }
    if moved {
        out.send(ScrollInput(page.metrics()));
    }
}

/// Show exactly the captions whose opacity is 1.
pub fn caption_visibility_system(
    opacities: Res<CaptionOpacities>,
    mut texts: Query<(&CaptionText, &mut Visibility)>,
) {
    if !opacities.is_changed() {
        return;
    }
    for (CaptionText(idx), mut vis) in texts.iter_mut() {
        let shown = opacities.0.get(*idx).copied().unwrap_or(0.0) > 0.0;
        *vis = if shown {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

pub fn overlay_text_system(
    overlay: Res<ScrollOverlay>,
    mut texts: Query<&mut Text, With<ScrollOverlayText>>,
) {
    if !overlay.is_changed() {
        return;
    }
    let Some(label) = overlay.0.as_deref() else {
        return;
    };
    for mut text in texts.iter_mut() {
        if let Some(section) = text.sections.first_mut() {
            section.value = label.to_string();
        }
    }
}
