//! Boolean active-state track of one object, always STEP-interpolated.
//!
//! The interchange format has no visibility channel; this track is never exported on
//! its own but merged into the object's `scale` curve (see [`crate::merge`]).

use std::sync::Arc;

use crate::interpolation::Interpolation;
use crate::samplers::VisibilitySampler;
use crate::scene::SceneGraph;
use crate::time::time_before;
use crate::track::{AnimationTrack, RecordOutcome, Track};
use crate::value::Value;

pub struct VisibilityTrack<S: SceneGraph> {
    track: Track<S, VisibilitySampler>,
}

impl<S: SceneGraph> VisibilityTrack<S> {
    /// Start the track for an object first seen at session time `first_seen`.
    ///
    /// The track always begins at time 0. Objects present at the start record their
    /// actual state there. Objects first seen later are invisible from 0 until just
    /// before `first_seen`, then take their actual state at `first_seen`, so the merged
    /// scale does not ramp up from the beginning of the recording.
    pub fn start(
        sampler: Arc<VisibilitySampler>,
        scene: &S,
        node: S::Node,
        first_seen: f64,
    ) -> Self {
        let at_start = first_seen <= 0.0;
        let track = Track::start_with(sampler, scene, node, 0.0, |visible| {
            Some(at_start && visible == Some(true))
        });
        let mut visibility = Self { track };
        if !at_start {
            let steady = visibility.last_visible().unwrap_or(false);
            if let Some(before) = time_before(first_seen, visibility.track.last().map(|l| l.0)) {
                visibility.record_at(before, steady);
            }
            visibility.track.sample_at(scene, node, first_seen);
        }
        visibility
    }

    /// Force a sample, e.g. right before a known transition.
    pub fn record_at(&mut self, time: f64, visible: bool) -> RecordOutcome {
        self.track.record(time, visible)
    }

    pub fn times(&self) -> &[f64] {
        self.track.times()
    }

    pub fn visibilities(&self) -> &[bool] {
        self.track.data()
    }

    pub fn last_visible(&self) -> Option<bool> {
        self.track.last().map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.track.len()
    }

    pub fn is_empty(&self) -> bool {
        self.track.is_empty()
    }
}

impl<S: SceneGraph> AnimationTrack<S> for VisibilityTrack<S> {
    fn property_name(&self) -> &str {
        VisibilitySampler::PROPERTY_NAME
    }

    fn interpolation(&self) -> Interpolation {
        Interpolation::Step
    }

    fn times(&self) -> &[f64] {
        self.track.times()
    }

    fn values(&self) -> Vec<Value> {
        self.track.data().iter().map(|v| Value::Bool(*v)).collect()
    }

    fn sample_if_changed(&mut self, scene: &S, node: S::Node, time: f64) {
        self.track.sample_at(scene, node, time);
    }
}

impl<S: SceneGraph> std::fmt::Debug for VisibilityTrack<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityTrack")
            .field("times", &self.track.times())
            .field("visible", &self.track.data())
            .finish()
    }
}
