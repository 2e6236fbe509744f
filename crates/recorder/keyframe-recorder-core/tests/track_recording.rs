mod common;

use std::sync::Arc;

use common::{MockScene, ROOT};
use keyframe_recorder_core::samplers::{ScaleSampler, TranslationSampler, VisibilitySampler};
use keyframe_recorder_core::{
    next_smaller, AnimationTrack, Interpolation, RecordOutcome, Track, Value, VisibilityTrack,
    WorldSpacePredicate,
};

fn translation_track(
    scene: &MockScene,
    node: u32,
) -> Track<MockScene, TranslationSampler<MockScene>> {
    Track::start(Arc::new(TranslationSampler::new(None)), scene, node, 0.0)
}

#[test]
fn runs_of_equal_values_keep_first_and_last_sample() {
    let mut scene = MockScene::new();
    let node = scene.add(ROOT);
    let mut track = translation_track(&scene, node);

    // 0, 0, 0, 1, 1, 1, 1, 2
    for (i, x) in [0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 2.0].iter().enumerate() {
        scene.set_translation(node, [*x, 0.0, 0.0]);
        track.sample_if_changed(&scene, node, (i + 1) as f64);
    }

    assert_eq!(track.times(), &[0.0, 2.0, 3.0, 6.0, 7.0]);
    let xs: Vec<f32> = track.data().iter().map(|v| v[0]).collect();
    assert_eq!(xs, vec![0.0, 0.0, 1.0, 1.0, 2.0]);
}

#[test]
fn record_reports_what_happened() {
    let scene = MockScene::new();
    let mut track = translation_track(&scene, ROOT);
    assert_eq!(track.len(), 1);

    assert_eq!(track.record(1.0, [0.0; 3]), RecordOutcome::Appended);
    assert_eq!(track.record(2.0, [0.0; 3]), RecordOutcome::Replaced);
    assert_eq!(track.times(), &[0.0, 2.0]);
    assert_eq!(track.record(3.0, [1.0, 0.0, 0.0]), RecordOutcome::Appended);
    assert!(RecordOutcome::Replaced.is_recorded());
    assert!(!RecordOutcome::DuplicateTime.is_recorded());
}

#[test]
fn duplicate_timestamp_keeps_existing_sample() {
    let scene = MockScene::new();
    let mut track = translation_track(&scene, ROOT);
    track.record(1.0, [1.0, 0.0, 0.0]);

    let outcome = track.record(1.0, [5.0, 0.0, 0.0]);
    assert_eq!(outcome, RecordOutcome::DuplicateTime);
    assert_eq!(track.len(), 2);
    assert_eq!(track.last().map(|(_, v)| *v), Some([1.0, 0.0, 0.0]));

    // identical value at the same time is silently ignored too
    assert_eq!(track.record(1.0, [1.0, 0.0, 0.0]), RecordOutcome::DuplicateTime);
    assert_eq!(track.len(), 2);
}

#[test]
fn out_of_order_sample_is_rejected() {
    let scene = MockScene::new();
    let mut track = translation_track(&scene, ROOT);
    track.record(2.0, [1.0; 3]);
    assert_eq!(track.record(1.0, [3.0; 3]), RecordOutcome::OutOfOrder);
    assert_eq!(track.times(), &[0.0, 2.0]);
}

#[test]
fn missing_node_records_nothing() {
    let mut scene = MockScene::new();
    let node = scene.add(ROOT);
    let mut track = translation_track(&scene, node);
    scene.remove(node);
    assert_eq!(track.sample_at(&scene, node, 1.0), None);
    assert_eq!(track.len(), 1);
}

#[test]
fn type_erased_view_exposes_values() {
    let mut scene = MockScene::new();
    scene.set_scale(ROOT, [2.0; 3]);
    let track = Track::start(Arc::new(ScaleSampler::new(None)), &scene, ROOT, 0.0);
    let erased: &dyn AnimationTrack<MockScene> = &track;
    assert_eq!(erased.property_name(), "scale");
    assert_eq!(erased.interpolation(), Interpolation::Linear);
    assert_eq!(erased.values(), vec![Value::Vec3([2.0; 3])]);
    assert_eq!(erased.last_time(), Some(0.0));
}

#[test]
fn world_space_translation_composes_parents() {
    let mut scene = MockScene::new();
    let child = scene.add(ROOT);
    scene.set_translation(ROOT, [1.0, 0.0, 0.0]);
    scene.set_scale(ROOT, [2.0; 3]);
    scene.set_translation(child, [1.0, 1.0, 0.0]);

    let world: WorldSpacePredicate<MockScene> = Arc::new(|_: &MockScene, _: u32| true);
    let world_track = Track::start(
        Arc::new(TranslationSampler::new(Some(world))),
        &scene,
        child,
        0.0,
    );
    assert_eq!(world_track.data(), &[[3.0, 2.0, 0.0]]);

    let local_track = translation_track(&scene, child);
    assert_eq!(local_track.data(), &[[1.0, 1.0, 0.0]]);
}

#[test]
fn visibility_of_initial_objects_starts_at_zero() {
    let mut scene = MockScene::new();
    let hidden = scene.add(ROOT);
    scene.set_active(hidden, false);

    let shown = VisibilityTrack::start(Arc::new(VisibilitySampler), &scene, ROOT, 0.0);
    assert_eq!(shown.times(), &[0.0]);
    assert_eq!(shown.visibilities(), &[true]);

    let track = VisibilityTrack::start(Arc::new(VisibilitySampler), &scene, hidden, 0.0);
    assert_eq!(track.visibilities(), &[false]);
    assert_eq!(AnimationTrack::<MockScene>::interpolation(&track), Interpolation::Step);
}

#[test]
fn spawned_object_is_invisible_until_first_seen() {
    let mut scene = MockScene::new();
    let node = scene.add(ROOT);

    let track = VisibilityTrack::start(Arc::new(VisibilitySampler), &scene, node, 0.5);
    assert_eq!(track.times(), &[0.0, next_smaller(0.5), 0.5]);
    assert_eq!(track.visibilities(), &[false, false, true]);
}

#[test]
fn spawned_inactive_object_collapses_to_a_single_run() {
    let mut scene = MockScene::new();
    let node = scene.add(ROOT);
    scene.set_active(node, false);

    let track = VisibilityTrack::start(Arc::new(VisibilitySampler), &scene, node, 0.5);
    assert_eq!(track.times(), &[0.0, 0.5]);
    assert_eq!(track.visibilities(), &[false, false]);
}

#[test]
fn visibility_toggles_are_step_samples() {
    let mut scene = MockScene::new();
    let node = scene.add(ROOT);
    let mut track = VisibilityTrack::start(Arc::new(VisibilitySampler), &scene, node, 0.0);

    for (t, active) in [(0.1, true), (0.2, false), (0.3, false), (0.4, false), (0.5, true)] {
        scene.set_active(node, active);
        track.sample_if_changed(&scene, node, t);
    }
    assert_eq!(track.times(), &[0.0, 0.1, 0.2, 0.4, 0.5]);
    assert_eq!(track.visibilities(), &[true, true, false, false, true]);
    assert_eq!(track.last_visible(), Some(true));
}
