//! Per-object recording state.

use std::fmt;
use std::sync::Arc;

use crate::sampler::SamplerRegistry;
use crate::scene::SceneGraph;
use crate::track::AnimationTrack;
use crate::visibility_track::VisibilityTrack;

/// Everything recorded for one object: an optional visibility track plus one track per
/// sampler whose target existed when the object was first seen.
pub struct AnimationData<S: SceneGraph> {
    node: S::Node,
    first_seen: f64,
    visibility: Option<VisibilityTrack<S>>,
    tracks: Vec<Box<dyn AnimationTrack<S>>>,
}

impl<S: SceneGraph> AnimationData<S> {
    /// Start tracks for `node`, first seen at session time `time`.
    pub fn new(registry: &SamplerRegistry<S>, scene: &S, node: S::Node, time: f64) -> Self {
        let visibility = registry
            .visibility()
            .map(|sampler| VisibilityTrack::start(Arc::clone(sampler), scene, node, time));
        let tracks = registry
            .samplers()
            .filter_map(|sampler| Arc::clone(sampler).start_track(scene, node, time))
            .collect();
        Self {
            node,
            first_seen: time,
            visibility,
            tracks,
        }
    }

    /// Sample visibility first, then every property track.
    pub fn update(&mut self, scene: &S, time: f64) {
        let node = self.node;
        if let Some(visibility) = self.visibility.as_mut() {
            visibility.sample_if_changed(scene, node, time);
        }
        for track in &mut self.tracks {
            track.sample_if_changed(scene, node, time);
        }
    }

    pub fn node(&self) -> S::Node {
        self.node
    }

    /// Session time at which the object was first recorded.
    pub fn first_seen(&self) -> f64 {
        self.first_seen
    }

    pub fn visibility(&self) -> Option<&VisibilityTrack<S>> {
        self.visibility.as_ref()
    }

    pub fn tracks(&self) -> &[Box<dyn AnimationTrack<S>>] {
        &self.tracks
    }

    /// Track recording `property_name`, if any.
    pub fn track(&self, property_name: &str) -> Option<&dyn AnimationTrack<S>> {
        self.tracks
            .iter()
            .find(|t| t.property_name() == property_name)
            .map(|t| &**t)
    }

    /// Keyframes held across all tracks, visibility included.
    pub fn keyframe_count(&self) -> usize {
        self.visibility.as_ref().map_or(0, |v| v.len())
            + self.tracks.iter().map(|t| t.len()).sum::<usize>()
    }
}

impl<S: SceneGraph> fmt::Debug for AnimationData<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationData")
            .field("node", &self.node)
            .field("first_seen", &self.first_seen)
            .field("visibility", &self.visibility)
            .field(
                "tracks",
                &self
                    .tracks
                    .iter()
                    .map(|t| (t.property_name(), t.len()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
