//! Visibility/scale merge.
//!
//! The interchange format has no boolean visibility channel, so visibility is folded
//! into the object's scale curve: the merged curve follows the recorded scale while the
//! object is visible and holds `(0, 0, 0)` while it is not. Every visibility flip gets a
//! companion sample one representable step earlier holding the pre-flip value, so a
//! LINEAR curve switches (almost) instantly instead of ramping between samples.
//!
//! Both inputs are strictly increasing time series; the merge walks them with two
//! cursors. When the previous visibility is unknown, the visibility sample being
//! processed stands in for it.

use serde::{Deserialize, Serialize};

use crate::interpolation::Interpolation;
use crate::time::{nearly_equal, time_before};
use crate::value::{lerp_vec3, VEC3_ONE, VEC3_ZERO};

/// Recorded visibility: parallel times and states.
#[derive(Copy, Clone, Debug)]
pub struct VisibilitySeries<'a> {
    pub times: &'a [f64],
    pub visibilities: &'a [bool],
}

/// Recorded scale: parallel times and values plus the curve's interpolation.
#[derive(Copy, Clone, Debug)]
pub struct ScaleSeries<'a> {
    pub times: &'a [f64],
    pub scales: &'a [[f32; 3]],
    pub interpolation: Interpolation,
}

/// Output of the merge; handed straight to the sink.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MergedScaleCurve {
    pub times: Vec<f64>,
    pub scales: Vec<[f32; 3]>,
    pub interpolation: Interpolation,
}

/// Merge optional visibility and scale series into one scale curve.
///
/// - neither present (or both empty): `None`
/// - scale only: the scale series unchanged
/// - visibility only: STEP curve with `(1,1,1)` / `(0,0,0)` per visibility sample
/// - both: the two-cursor merge, with the scale series' interpolation
pub fn merge_visibility_and_scale(
    visibility: Option<VisibilitySeries<'_>>,
    scale: Option<ScaleSeries<'_>>,
) -> Option<MergedScaleCurve> {
    let visibility = visibility.filter(|v| !v.times.is_empty() && !v.visibilities.is_empty());
    let scale = scale.filter(|s| !s.times.is_empty() && !s.scales.is_empty());

    match (visibility, scale) {
        (None, None) => None,
        (None, Some(scale)) => Some(MergedScaleCurve {
            times: scale.times.to_vec(),
            scales: scale.scales.to_vec(),
            interpolation: scale.interpolation,
        }),
        (Some(visibility), None) => {
            let n = visibility.times.len().min(visibility.visibilities.len());
            Some(MergedScaleCurve {
                times: visibility.times[..n].to_vec(),
                scales: visibility.visibilities[..n]
                    .iter()
                    .map(|visible| if *visible { VEC3_ONE } else { VEC3_ZERO })
                    .collect(),
                interpolation: Interpolation::Step,
            })
        }
        (Some(visibility), Some(scale)) => {
            let (times, scales) = ScaleVisibilityMerger::new(
                visibility.times,
                visibility.visibilities,
                scale.times,
                scale.scales,
            )
            .merge();
            Some(MergedScaleCurve {
                times,
                scales,
                interpolation: scale.interpolation,
            })
        }
    }
}

/// One merged sample before timestamps are finalized.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Emit {
    /// Sample exactly at the given time.
    At(f64, [f32; 3]),
    /// Sample at the closest representable time before the given time.
    JustBefore(f64, [f32; 3]),
}

/// Two-cursor merge state over borrowed input series.
pub struct ScaleVisibilityMerger<'a> {
    vis_times: &'a [f64],
    visibilities: &'a [bool],
    scale_times: &'a [f64],
    scales: &'a [[f32; 3]],

    vis_index: usize,
    scale_index: usize,

    out_times: Vec<f64>,
    out_scales: Vec<[f32; 3]>,
}

impl<'a> ScaleVisibilityMerger<'a> {
    /// Mismatched time/value lengths are truncated to the shorter of the two.
    pub fn new(
        vis_times: &'a [f64],
        visibilities: &'a [bool],
        scale_times: &'a [f64],
        scales: &'a [[f32; 3]],
    ) -> Self {
        let vis_len = vis_times.len().min(visibilities.len());
        let scale_len = scale_times.len().min(scales.len());
        Self {
            vis_times: &vis_times[..vis_len],
            visibilities: &visibilities[..vis_len],
            scale_times: &scale_times[..scale_len],
            scales: &scales[..scale_len],
            vis_index: 0,
            scale_index: 0,
            out_times: Vec::with_capacity(vis_len + scale_len),
            out_scales: Vec::with_capacity(vis_len + scale_len),
        }
    }

    #[inline]
    fn last_visible(&self) -> Option<bool> {
        self.vis_index
            .checked_sub(1)
            .map(|i| self.visibilities[i])
    }

    #[inline]
    fn last_scale_time(&self) -> Option<f64> {
        self.scale_index
            .checked_sub(1)
            .map(|i| self.scale_times[i])
    }

    #[inline]
    fn last_scale(&self) -> Option<[f32; 3]> {
        self.scale_index.checked_sub(1).map(|i| self.scales[i])
    }

    /// Run the merge and return parallel (times, scales).
    pub fn merge(mut self) -> (Vec<f64>, Vec<[f32; 3]>) {
        while self.vis_index < self.vis_times.len() && self.scale_index < self.scale_times.len() {
            let vis_time = self.vis_times[self.vis_index];
            let visible = self.visibilities[self.vis_index];
            let scale_time = self.scale_times[self.scale_index];
            let scale = self.scales[self.scale_index];

            if nearly_equal(vis_time, scale_time) {
                if vis_time <= 0.0 {
                    let value = if visible {
                        self.last_scale().unwrap_or(scale)
                    } else {
                        VEC3_ZERO
                    };
                    self.emit(Emit::At(vis_time, value));
                } else {
                    let last_visible = self.last_visible().unwrap_or(visible);
                    for sample in both_sampled_at_same_time(vis_time, visible, scale, last_visible) {
                        self.emit(sample);
                    }
                }
                self.vis_index += 1;
                self.scale_index += 1;
            } else if vis_time < scale_time {
                if vis_time <= 0.0 {
                    let value = if visible {
                        self.last_scale().unwrap_or(scale)
                    } else {
                        VEC3_ZERO
                    };
                    self.emit(Emit::At(vis_time, value));
                } else {
                    let samples = samples_for_next_visibility_change(
                        vis_time,
                        visible,
                        scale_time,
                        scale,
                        self.last_visible().unwrap_or(visible),
                        self.last_scale_time().unwrap_or(vis_time),
                        // scales are sampled when a record is created, so a missing
                        // previous scale only happens for hand-built input
                        self.last_scale().unwrap_or(scale),
                    );
                    for sample in samples {
                        self.emit(sample);
                    }
                }
                self.vis_index += 1;
            } else {
                // scale changes first; irrelevant while invisible
                if self.last_visible().unwrap_or(visible) {
                    self.emit(Emit::At(scale_time, scale));
                }
                self.scale_index += 1;
            }
        }

        // scale exhausted: every remaining visibility sample is emitted
        while self.vis_index < self.vis_times.len() {
            let vis_time = self.vis_times[self.vis_index];
            let visible = self.visibilities[self.vis_index];
            let held_scale = self.last_scale().unwrap_or(VEC3_ONE);
            if let Some(last_visible) = self.last_visible() {
                if last_visible != visible && vis_time > 0.0 {
                    let before = if last_visible { held_scale } else { VEC3_ZERO };
                    self.emit(Emit::JustBefore(vis_time, before));
                }
            }
            let value = if visible { held_scale } else { VEC3_ZERO };
            self.emit(Emit::At(vis_time, value));
            self.vis_index += 1;
        }

        // visibility exhausted: remaining scales only matter while still visible
        while self.scale_index < self.scale_times.len() && self.last_visible().unwrap_or(true) {
            let scale_time = self.scale_times[self.scale_index];
            let scale = self.scales[self.scale_index];
            self.emit(Emit::At(scale_time, scale));
            self.scale_index += 1;
        }

        // never visible: keep one hidden key instead of handing out an empty curve
        if self.out_times.is_empty() {
            if let Some(&first) = self.vis_times.first() {
                self.push(first, VEC3_ZERO);
            }
        }

        (self.out_times, self.out_scales)
    }

    fn emit(&mut self, sample: Emit) {
        match sample {
            Emit::At(time, scale) => self.push(time, scale),
            Emit::JustBefore(time, scale) => {
                match time_before(time, self.out_times.last().copied()) {
                    Some(before) => self.push(before, scale),
                    None => log::debug!(
                        "no representable time between the previous merged sample and {}; transition sample skipped",
                        time
                    ),
                }
            }
        }
    }

    fn push(&mut self, time: f64, scale: [f32; 3]) {
        if let Some(&last) = self.out_times.last() {
            if time <= last {
                log::debug!("merged sample at {} does not follow {}; dropped", time, last);
                return;
            }
        }
        self.out_times.push(time);
        self.out_scales.push(scale);
    }
}

/// Both series have a sample at `time` (> 0).
pub(crate) fn both_sampled_at_same_time(
    time: f64,
    visible: bool,
    scale: [f32; 3],
    last_visible: bool,
) -> Vec<Emit> {
    match (last_visible, visible) {
        (true, false) => vec![Emit::JustBefore(time, scale), Emit::At(time, VEC3_ZERO)],
        (true, true) => vec![Emit::At(time, scale)],
        (false, false) => Vec::new(),
        (false, true) => vec![Emit::JustBefore(time, VEC3_ZERO), Emit::At(time, scale)],
    }
}

/// Visibility changes at `vis_time`, before the next scale sample at `scale_time`.
/// The scale at `vis_time` is interpolated between the surrounding scale samples.
pub(crate) fn samples_for_next_visibility_change(
    vis_time: f64,
    visible: bool,
    scale_time: f64,
    scale: [f32; 3],
    last_visible: bool,
    last_scale_time: f64,
    last_scale: [f32; 3],
) -> Vec<Emit> {
    if last_visible == visible {
        return Vec::new();
    }
    let span = scale_time - last_scale_time;
    let weight = if span > 0.0 {
        ((vis_time - last_scale_time) / span) as f32
    } else {
        0.0
    };
    let interpolated = lerp_vec3(last_scale, scale, weight);
    if visible {
        vec![
            Emit::JustBefore(vis_time, VEC3_ZERO),
            Emit::At(vis_time, interpolated),
        ]
    } else {
        vec![
            Emit::JustBefore(vis_time, interpolated),
            Emit::At(vis_time, VEC3_ZERO),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::next_smaller;

    const TWO: [f32; 3] = [2.0, 2.0, 2.0];

    //   vis   x------------x
    //   scale -------------x (2)
    #[test]
    fn same_time_visible_to_visible_keeps_scale() {
        let out = both_sampled_at_same_time(1.0, true, TWO, true);
        assert_eq!(out, vec![Emit::At(1.0, TWO)]);
    }

    #[test]
    fn same_time_invisible_to_invisible_emits_nothing() {
        assert!(both_sampled_at_same_time(1.0, false, VEC3_ONE, false).is_empty());
    }

    #[test]
    fn same_time_visible_to_invisible_holds_scale_until_flip() {
        let out = both_sampled_at_same_time(1.0, false, [3.0; 3], true);
        assert_eq!(
            out,
            vec![Emit::JustBefore(1.0, [3.0; 3]), Emit::At(1.0, VEC3_ZERO)]
        );
    }

    #[test]
    fn same_time_invisible_to_visible_jumps_from_zero() {
        let out = both_sampled_at_same_time(1.0, true, [3.0; 3], false);
        assert_eq!(
            out,
            vec![Emit::JustBefore(1.0, VEC3_ZERO), Emit::At(1.0, [3.0; 3])]
        );
    }

    #[test]
    fn visibility_change_between_scales_interpolates() {
        // scale 1 at t=0, 3 at t=1; becomes invisible at 0.5
        let out = samples_for_next_visibility_change(0.5, false, 1.0, [3.0; 3], true, 0.0, VEC3_ONE);
        assert_eq!(
            out,
            vec![Emit::JustBefore(0.5, TWO), Emit::At(0.5, VEC3_ZERO)]
        );

        let out = samples_for_next_visibility_change(0.5, true, 1.0, [3.0; 3], false, 0.0, VEC3_ONE);
        assert_eq!(out, vec![Emit::JustBefore(0.5, VEC3_ZERO), Emit::At(0.5, TWO)]);
    }

    #[test]
    fn unchanged_visibility_between_scales_emits_nothing() {
        assert!(
            samples_for_next_visibility_change(0.5, true, 1.0, TWO, true, 0.0, VEC3_ONE).is_empty()
        );
        assert!(
            samples_for_next_visibility_change(0.5, false, 1.0, TWO, false, 0.0, VEC3_ONE)
                .is_empty()
        );
    }

    #[test]
    fn absent_inputs_degrade() {
        assert!(merge_visibility_and_scale(None, None).is_none());

        let times = [0.0, 0.5, 1.0];
        let scales = [VEC3_ONE; 3];
        let merged = merge_visibility_and_scale(
            None,
            Some(ScaleSeries {
                times: &times,
                scales: &scales,
                interpolation: Interpolation::Linear,
            }),
        )
        .unwrap();
        assert_eq!(merged.times, times.to_vec());
        assert_eq!(merged.scales, scales.to_vec());
        assert_eq!(merged.interpolation, Interpolation::Linear);

        let visible = [false, true, false];
        let merged = merge_visibility_and_scale(
            Some(VisibilitySeries {
                times: &times,
                visibilities: &visible,
            }),
            None,
        )
        .unwrap();
        assert_eq!(merged.interpolation, Interpolation::Step);
        assert_eq!(merged.times, times.to_vec());
        assert_eq!(merged.scales, vec![VEC3_ZERO, VEC3_ONE, VEC3_ZERO]);
    }

    #[test]
    fn staying_hidden_on_a_scale_key_adds_no_key() {
        let times = [0.0, 0.5, 1.0];
        let visible = [true, false, false];
        let scales = [VEC3_ONE; 3];
        let (out_times, out_scales) =
            ScaleVisibilityMerger::new(&times, &visible, &times, &scales).merge();
        assert_eq!(out_times, vec![0.0, next_smaller(0.5), 0.5]);
        assert_eq!(out_scales, vec![VEC3_ONE, VEC3_ONE, VEC3_ZERO]);
    }

    #[test]
    fn never_visible_keeps_a_single_hidden_key() {
        let vis_times = [0.5];
        let visible = [false];
        let scale_times = [0.0, 0.2, 0.8];
        let scales = [VEC3_ONE, TWO, VEC3_ONE];
        let merged = merge_visibility_and_scale(
            Some(VisibilitySeries {
                times: &vis_times,
                visibilities: &visible,
            }),
            Some(ScaleSeries {
                times: &scale_times,
                scales: &scales,
                interpolation: Interpolation::Linear,
            }),
        )
        .unwrap();
        assert_eq!(merged.times, vec![0.5]);
        assert_eq!(merged.scales, vec![VEC3_ZERO]);
    }

    #[test]
    fn nudge_never_collides_with_previous_sample() {
        // visibility flips one ULP after a visible scale sample
        let flip = 1.0;
        let scale_times = [0.0, next_smaller(flip), 2.0];
        let scales = [VEC3_ONE, TWO, TWO];
        let vis_times = [0.0, flip];
        let visible = [true, false];
        let (times, _) =
            ScaleVisibilityMerger::new(&vis_times, &visible, &scale_times, &scales).merge();
        assert!(times.windows(2).all(|w| w[0] < w[1]), "{times:?}");
        assert_eq!(times.last(), Some(&flip));
    }
}
