use vizij_scroll_core::{showcase, CaptionTable, SceneState, Timeline, TimelineSpec};

fn load(name: &str) -> Timeline {
    let spec: TimelineSpec = vizij_test_fixtures::timelines::load(name).expect("fixture loads");
    Timeline::from_spec(&spec).expect("fixture timeline is valid")
}

#[test]
fn helmet_fixture_matches_builtin_timeline() {
    let from_json = load("helmet");
    let builtin = showcase::timeline();
    assert_eq!(from_json.len(), builtin.len());

    for step in 0..=200 {
        let p = step as f32 * 0.5;
        let mut a = SceneState::default();
        let mut b = SceneState::default();
        let fa = from_json.dispatch(p, &mut a);
        let fb = builtin.dispatch(p, &mut b);
        assert_eq!(fa, fb, "percent {p}");
        for i in 0..3 {
            assert!((a.position[i] - b.position[i]).abs() < 1e-6, "percent {p}");
            assert!((a.rotation[i] - b.rotation[i]).abs() < 1e-6, "percent {p}");
            assert!((a.emissive[i] - b.emissive[i]).abs() < 1e-6, "percent {p}");
        }
        assert_eq!(a.spotlight_intensity, b.spotlight_intensity);
        assert_eq!(a.controls, b.controls);
    }
}

#[test]
fn builtin_timeline_serializes_to_spec() {
    let spec = showcase::timeline()
        .to_spec("helmet")
        .expect("builtin timeline is declarative");
    let json = serde_json::to_string(&spec).expect("spec serializes");
    let back: TimelineSpec = serde_json::from_str(&json).expect("spec parses");
    assert_eq!(back, spec);
    assert_eq!(back.entries[2].label.as_deref(), Some("build"));
    assert!(back.entries[2].ops.is_empty());
}

#[test]
fn overlapping_fixture_applies_in_table_order() {
    let t = load("overlap");
    let mut scene = SceneState::default();
    let d = t.dispatch(30.0, &mut scene);
    assert_eq!(d.fired, vec![0]);
    assert_eq!(scene.spotlight_intensity, 3.0);

    let d = t.dispatch(50.0, &mut scene);
    assert_eq!(d.fired, vec![0, 1]);
    assert_eq!(scene.spotlight_intensity, 1.0);
}

#[test]
fn caption_fixture_matches_builtin_table() {
    let table: CaptionTable =
        vizij_test_fixtures::captions::load("showcase").expect("caption fixture loads");
    assert_eq!(table, CaptionTable::showcase());
}
