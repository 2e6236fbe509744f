use crate::interpolation::Interpolation;
use crate::sampler::Sampler;
use crate::scene::{NodeRef, SceneGraph};

use super::SCALE;

/// Active state of a node. Only ever recorded into a
/// [`VisibilityTrack`](crate::visibility_track::VisibilityTrack).
#[derive(Copy, Clone, Debug, Default)]
pub struct VisibilitySampler;

impl VisibilitySampler {
    pub const PROPERTY_NAME: &'static str = "visibility";

    /// Curve the visibility track is merged into on export.
    pub const MERGED_INTO: &'static str = SCALE;
}

impl<S: SceneGraph> Sampler<S> for VisibilitySampler {
    type Target = NodeRef;
    type Data = bool;

    fn property_name(&self) -> &str {
        Self::PROPERTY_NAME
    }

    fn interpolation(&self) -> Interpolation {
        Interpolation::Step
    }

    fn target_of(&self, scene: &S, node: S::Node) -> Option<NodeRef> {
        scene.contains(node).then_some(NodeRef)
    }

    fn read(&self, scene: &S, node: S::Node, _: &NodeRef) -> Option<bool> {
        scene.active_self(node)
    }
}
