use std::borrow::Cow;

use keyframe_recorder_core::{remove_unneeded_keyframes, Value};
use keyframe_test_fixtures::reductions;

#[test]
fn reduction_fixtures() {
    for name in reductions::keys() {
        let fixture = reductions::load(&name).expect("load reduction fixture");
        let (times, values) = remove_unneeded_keyframes(&fixture.times, &fixture.values);
        assert_eq!(&*times, fixture.expected.times.as_slice(), "{name}: times");
        assert_eq!(&*values, fixture.expected.values.as_slice(), "{name}: values");
    }
}

#[test]
fn unchanged_input_is_borrowed() {
    let fixture = reductions::load("all-unique").unwrap();
    let (times, values) = remove_unneeded_keyframes(&fixture.times, &fixture.values);
    assert!(matches!(times, Cow::Borrowed(_)));
    assert!(matches!(values, Cow::Borrowed(_)));

    let fixture = reductions::load("short-runs").unwrap();
    let (times, values) = remove_unneeded_keyframes(&fixture.times, &fixture.values);
    assert!(matches!(times, Cow::Borrowed(_)));
    assert!(matches!(values, Cow::Borrowed(_)));
}

#[test]
fn reduced_input_is_owned() {
    let fixture = reductions::load("two-runs").unwrap();
    let (times, _) = remove_unneeded_keyframes(&fixture.times, &fixture.values);
    assert!(matches!(times, Cow::Owned(_)));
}

#[test]
fn tiny_inputs_are_noops() {
    let (t, v) = remove_unneeded_keyframes::<f64, f32>(&[], &[]);
    assert!(t.is_empty() && v.is_empty());

    let (t, v) = remove_unneeded_keyframes(&[0.0], &[1.0_f32]);
    assert_eq!(&*t, &[0.0]);
    assert_eq!(&*v, &[1.0]);

    let (t, _) = remove_unneeded_keyframes(&[0.0, 1.0], &[1.0_f32, 1.0]);
    assert_eq!(t.len(), 2);
}

#[test]
fn mismatched_lengths_are_returned_unchanged() {
    let times = [0.0, 1.0, 2.0];
    let values = [1.0_f32, 1.0, 1.0, 1.0];
    let (t, v) = remove_unneeded_keyframes(&times, &values);
    assert!(matches!(t, Cow::Borrowed(_)));
    assert_eq!(v.len(), 4);
}

#[test]
fn vector_values_compare_componentwise() {
    let times = [0.0, 1.0, 2.0, 3.0];
    let values = [
        Value::Vec3([0.0, 1.0, 0.0]),
        Value::Vec3([0.0, 1.0, 0.0]),
        Value::Vec3([0.0, 1.0, 0.0]),
        Value::Vec3([0.0, 1.0, 0.5]),
    ];
    let (t, v) = remove_unneeded_keyframes(&times, &values);
    assert_eq!(&*t, &[0.0, 2.0, 3.0]);
    assert_eq!(v[2], Value::Vec3([0.0, 1.0, 0.5]));
}
