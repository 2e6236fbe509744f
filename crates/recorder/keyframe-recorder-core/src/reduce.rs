//! Keyframe reduction applied to finished curves before export.
//!
//! A keyframe whose value equals both of its neighbours contributes nothing under any
//! interpolation that passes through its keys, so it is dropped. Runs of equal values
//! keep their first and last keyframe, which preserves instantaneous jumps at the edges
//! of the run. Inputs without redundant keyframes are returned borrowed.

use std::borrow::Cow;

/// Reduced (times, values); borrowed when nothing was removed.
pub type Reduced<'a, T, V> = (Cow<'a, [T]>, Cow<'a, [V]>);

/// Drop every keyframe whose value equals both of its neighbours.
///
/// Mismatched lengths are reported and returned unchanged.
pub fn remove_unneeded_keyframes<'a, T, V>(times: &'a [T], values: &'a [V]) -> Reduced<'a, T, V>
where
    T: Clone,
    V: Clone + PartialEq,
{
    remove_unneeded_keyframes_by(times, values, |a, b| a == b)
}

/// [`remove_unneeded_keyframes`] with a caller-supplied value equality.
pub fn remove_unneeded_keyframes_by<'a, T, V>(
    times: &'a [T],
    values: &'a [V],
    eq: impl Fn(&V, &V) -> bool,
) -> Reduced<'a, T, V>
where
    T: Clone,
    V: Clone,
{
    if times.len() != values.len() {
        log::warn!(
            "keyframe reduction skipped: {} times but {} values",
            times.len(),
            values.len()
        );
        return (Cow::Borrowed(times), Cow::Borrowed(values));
    }

    let redundant = redundant_indices(values, eq);
    if redundant.is_empty() {
        return (Cow::Borrowed(times), Cow::Borrowed(values));
    }

    let kept = times.len() - redundant.len();
    let mut out_times = Vec::with_capacity(kept);
    let mut out_values = Vec::with_capacity(kept);
    let mut skip = redundant.iter().copied().peekable();
    for (i, (time, value)) in times.iter().zip(values).enumerate() {
        if skip.peek() == Some(&i) {
            skip.next();
            continue;
        }
        out_times.push(time.clone());
        out_values.push(value.clone());
    }
    (Cow::Owned(out_times), Cow::Owned(out_values))
}

/// Reduction for curves whose keyframes span `stride` consecutive values, such as a
/// flattened morph weight curve with one value per target. Two keyframes are equal when
/// all of their values are.
///
/// A zero stride or `values.len() != times.len() * stride` is reported and returned
/// unchanged.
pub fn remove_unneeded_strided_keyframes<'a, T, V>(
    times: &'a [T],
    values: &'a [V],
    stride: usize,
) -> Reduced<'a, T, V>
where
    T: Clone,
    V: Clone + PartialEq,
{
    if stride == 0 || times.len().checked_mul(stride) != Some(values.len()) {
        log::warn!(
            "strided keyframe reduction skipped: {} times, {} values, stride {}",
            times.len(),
            values.len(),
            stride
        );
        return (Cow::Borrowed(times), Cow::Borrowed(values));
    }
    if stride == 1 {
        return remove_unneeded_keyframes(times, values);
    }

    let frames: Vec<&[V]> = values.chunks_exact(stride).collect();
    let redundant = redundant_indices(&frames, |a, b| a == b);
    if redundant.is_empty() {
        return (Cow::Borrowed(times), Cow::Borrowed(values));
    }

    let kept = times.len() - redundant.len();
    let mut out_times = Vec::with_capacity(kept);
    let mut out_values = Vec::with_capacity(kept * stride);
    let mut skip = redundant.iter().copied().peekable();
    for (i, (time, frame)) in times.iter().zip(&frames).enumerate() {
        if skip.peek() == Some(&i) {
            skip.next();
            continue;
        }
        out_times.push(time.clone());
        out_values.extend_from_slice(frame);
    }
    (Cow::Owned(out_times), Cow::Owned(out_values))
}

/// Ascending indices of keyframes equal to both neighbours.
fn redundant_indices<V>(values: &[V], eq: impl Fn(&V, &V) -> bool) -> Vec<usize> {
    let mut out = Vec::new();
    let mut equals_previous = false;
    for (i, pair) in values.windows(2).enumerate() {
        let equals_next = eq(&pair[0], &pair[1]);
        if equals_previous && equals_next {
            out.push(i);
        }
        equals_previous = equals_next;
    }
    out
}
