use std::f32::consts::FRAC_PI_4;

use bevy::prelude::*;
use bevy::window::WindowResized;
use bevy_vizij_scroll::{
    CaptionOpacities, CaptionText, InteractionEnded, LastDispatch, ModelLoadState, ScrollInput,
    ScrollModel, ScrollOverlay, ScrollScene, ScrollState, ScrollViewport, ShowcaseCamera,
    ShowcaseSpotlight, VirtualPage, VizijScrollPlugin,
};
use vizij_scroll_core::{Config, ModelStatus, ScrollMetrics};

fn app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(VizijScrollPlugin::default());
    app
}

// 1100px page, 100px viewport: scroll_top == percent * 10.
fn scroll_to(app: &mut App, percent: f32) {
    app.world_mut()
        .send_event(ScrollInput(ScrollMetrics::new(percent * 10.0, 1100.0, 100.0)));
}

fn mark_loaded(app: &mut App) {
    app.world_mut().resource_mut::<ModelLoadState>().0 = ModelStatus::Ready;
}

#[test]
fn plugin_inserts_resources() {
    let app = app();
    assert!(app.world().get_resource::<ScrollState>().is_some());
    assert!(app.world().get_resource::<ScrollScene>().is_some());
    assert!(app.world().get_resource::<CaptionOpacities>().is_some());
    assert_eq!(
        app.world().resource::<ModelLoadState>().0,
        ModelStatus::Pending
    );
}

#[test]
fn no_dispatch_before_model_is_ready() {
    let mut app = app();
    let model = app
        .world_mut()
        .spawn((Transform::default(), ScrollModel))
        .id();
    scroll_to(&mut app, 15.0);
    app.update();

    assert!(app.world().resource::<LastDispatch>().0.is_empty());
    let tf = app.world().get::<Transform>(model).unwrap();
    assert_eq!(tf.translation, Vec3::ZERO);
    // Captions still follow the scroll.
    assert_eq!(
        app.world().resource::<CaptionOpacities>().0,
        vec![0.0, 0.0, 0.0, 0.0, 0.0]
    );
}

#[test]
fn ready_model_follows_timeline_pose() {
    let mut app = app();
    let model = app
        .world_mut()
        .spawn((Transform::default(), ScrollModel))
        .id();
    mark_loaded(&mut app);
    scroll_to(&mut app, 0.0);
    app.update();

    assert_eq!(app.world().resource::<LastDispatch>().0, vec![0]);
    let tf = app.world().get::<Transform>(model).unwrap();
    assert_eq!(tf.translation, Vec3::new(1.0, 0.0, 0.0));
    let expected = Quat::from_euler(EulerRot::XYZ, 0.0, -FRAC_PI_4, 0.0);
    assert!(tf.rotation.abs_diff_eq(expected, 1e-6));
    assert_eq!(
        app.world().resource::<CaptionOpacities>().0,
        vec![1.0, 0.0, 0.0, 0.0, 0.0]
    );
}

#[test]
fn spotlight_turns_on_in_visor_segment() {
    let mut app = app();
    let cfg = ShowcaseSpotlight::default();
    let spot = app
        .world_mut()
        .spawn((SpotLight::default(), cfg))
        .id();
    mark_loaded(&mut app);
    scroll_to(&mut app, 52.0);
    app.update();

    let light = app.world().get::<SpotLight>(spot).unwrap();
    assert_eq!(light.intensity, 3.0 * cfg.lumens_per_unit);
}

#[test]
fn captions_toggle_visibility() {
    let mut app = app();
    let texts: Vec<Entity> = (0..5)
        .map(|i| {
            app.world_mut()
                .spawn((CaptionText(i), Visibility::Inherited))
                .id()
        })
        .collect();
    scroll_to(&mut app, 27.0);
    app.update();

    for (i, e) in texts.iter().enumerate() {
        let vis = app.world().get::<Visibility>(*e).unwrap();
        if i == 1 {
            assert_eq!(*vis, Visibility::Inherited);
        } else {
            assert_eq!(*vis, Visibility::Hidden);
        }
    }
}

#[test]
fn resize_updates_viewport_aspect() {
    let mut app = app();
    let cam = app
        .world_mut()
        .spawn((
            Transform::default(),
            Projection::Perspective(PerspectiveProjection::default()),
            ShowcaseCamera,
        ))
        .id();
    let scene_before = app.world().resource::<ScrollScene>().0.clone();
    app.world_mut().send_event(WindowResized {
        window: Entity::PLACEHOLDER,
        width: 1600.0,
        height: 800.0,
    });
    app.update();

    let vp = app.world().resource::<ScrollViewport>().0;
    assert_eq!(vp.width, 1600.0);
    assert_eq!(vp.height, 800.0);
    assert_eq!(vp.camera.aspect, 2.0);
    match app.world().get::<Projection>(cam).unwrap() {
        Projection::Perspective(p) => assert_eq!(p.aspect_ratio, 2.0),
        other => panic!("unexpected projection {other:?}"),
    }
    assert_eq!(app.world().resource::<ScrollScene>().0, scene_before);
}

#[test]
fn interaction_end_snaps_camera_back() {
    let mut app = app();
    let cam = app
        .world_mut()
        .spawn((Transform::from_xyz(3.0, 2.0, 1.0), ShowcaseCamera))
        .id();
    app.world_mut().resource_mut::<ScrollScene>().0.camera.position = [3.0, 2.0, 1.0];
    app.world_mut().send_event(InteractionEnded);
    app.update();

    let tf = app.world().get::<Transform>(cam).unwrap();
    assert_eq!(tf.translation, Vec3::new(0.0, 0.0, 3.0));
}

#[test]
fn failed_load_stays_inert() {
    let mut app = app();
    let model = app
        .world_mut()
        .spawn((Transform::default(), ScrollModel))
        .id();
    app.world_mut().resource_mut::<ModelLoadState>().0 =
        ModelStatus::Failed("missing asset".into());
    for p in [10.0, 40.0, 95.0] {
        scroll_to(&mut app, p);
        app.update();
    }
    assert!(app.world().resource::<LastDispatch>().0.is_empty());
    assert_eq!(
        app.world().get::<Transform>(model).unwrap().translation,
        Vec3::ZERO
    );
}

fn spawn_captions(app: &mut App) -> Vec<Entity> {
    (0..5)
        .map(|i| {
            app.world_mut()
                .spawn((CaptionText(i), Visibility::Inherited))
                .id()
        })
        .collect()
}

#[test]
fn title_caption_visible_before_any_scroll() {
    let mut app = app();
    let texts = spawn_captions(&mut app);
    app.update();

    assert_eq!(
        app.world().resource::<CaptionOpacities>().0,
        vec![1.0, 0.0, 0.0, 0.0, 0.0]
    );
    let vis = |e: Entity| *app.world().get::<Visibility>(e).unwrap();
    assert_eq!(vis(texts[0]), Visibility::Inherited);
    for e in &texts[1..] {
        assert_eq!(vis(*e), Visibility::Hidden);
    }
}

#[test]
fn startup_scrolls_virtual_page_to_top() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins).add_plugins(VizijScrollPlugin {
        config: Config {
            development: true,
            ..Config::default()
        },
        ..Default::default()
    });
    let mut page = VirtualPage::default();
    page.scroll_by(1000.0);
    app.insert_resource(page);
    app.update();

    assert_eq!(app.world().resource::<VirtualPage>().scroll_top, 0.0);
    assert_eq!(app.world().resource::<ScrollState>().0.progress().percent, 0.0);
    assert_eq!(
        app.world().resource::<ScrollOverlay>().0.as_deref(),
        Some("Scroll Progress : 0.00")
    );
}
