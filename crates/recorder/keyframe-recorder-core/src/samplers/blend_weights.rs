use crate::interpolation::Interpolation;
use crate::sampler::Sampler;
use crate::scene::{SceneGraph, SkinnedMeshRef};
use crate::value::Weights;

use super::WEIGHTS;

/// Blend shape weights of a skinned mesh. Meshes without blend shapes record nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct BlendWeightSampler;

impl<S: SceneGraph> Sampler<S> for BlendWeightSampler {
    type Target = SkinnedMeshRef;
    type Data = Weights;

    fn property_name(&self) -> &str {
        WEIGHTS
    }

    fn interpolation(&self) -> Interpolation {
        Interpolation::Linear
    }

    fn target_of(&self, scene: &S, node: S::Node) -> Option<SkinnedMeshRef> {
        scene.has_skinned_mesh(node).then_some(SkinnedMeshRef)
    }

    fn read(&self, scene: &S, node: S::Node, _: &SkinnedMeshRef) -> Option<Weights> {
        scene
            .blend_shape_weights(node)
            .filter(|w| !w.is_empty())
            .map(Weights)
    }
}
