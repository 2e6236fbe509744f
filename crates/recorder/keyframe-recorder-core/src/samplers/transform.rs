use crate::interpolation::Interpolation;
use crate::sampler::{Sampler, WorldSpacePredicate};
use crate::scene::{SceneGraph, Transform, TransformRef};
use crate::value::Quat;

use super::{ROTATION, SCALE, TRANSLATION};

/// Local transform unless the predicate asks for world space for this node.
fn transform_in_space<S: SceneGraph>(
    scene: &S,
    node: S::Node,
    world_space: Option<&WorldSpacePredicate<S>>,
) -> Option<Transform> {
    if world_space.is_some_and(|in_world| (**in_world)(scene, node)) {
        scene.world_transform(node)
    } else {
        scene.local_transform(node)
    }
}

fn transform_target<S: SceneGraph>(scene: &S, node: S::Node) -> Option<TransformRef> {
    scene.contains(node).then_some(TransformRef)
}

pub struct TranslationSampler<S: SceneGraph> {
    world_space: Option<WorldSpacePredicate<S>>,
}

impl<S: SceneGraph> TranslationSampler<S> {
    pub fn new(world_space: Option<WorldSpacePredicate<S>>) -> Self {
        Self { world_space }
    }
}

impl<S: SceneGraph> Sampler<S> for TranslationSampler<S> {
    type Target = TransformRef;
    type Data = [f32; 3];

    fn property_name(&self) -> &str {
        TRANSLATION
    }

    fn interpolation(&self) -> Interpolation {
        Interpolation::Linear
    }

    fn target_of(&self, scene: &S, node: S::Node) -> Option<TransformRef> {
        transform_target(scene, node)
    }

    fn read(&self, scene: &S, node: S::Node, _: &TransformRef) -> Option<[f32; 3]> {
        transform_in_space(scene, node, self.world_space.as_ref()).map(|t| t.translation)
    }
}

pub struct RotationSampler<S: SceneGraph> {
    world_space: Option<WorldSpacePredicate<S>>,
}

impl<S: SceneGraph> RotationSampler<S> {
    pub fn new(world_space: Option<WorldSpacePredicate<S>>) -> Self {
        Self { world_space }
    }
}

impl<S: SceneGraph> Sampler<S> for RotationSampler<S> {
    type Target = TransformRef;
    type Data = Quat;

    fn property_name(&self) -> &str {
        ROTATION
    }

    fn interpolation(&self) -> Interpolation {
        Interpolation::Linear
    }

    fn target_of(&self, scene: &S, node: S::Node) -> Option<TransformRef> {
        transform_target(scene, node)
    }

    fn read(&self, scene: &S, node: S::Node, _: &TransformRef) -> Option<Quat> {
        transform_in_space(scene, node, self.world_space.as_ref()).map(|t| t.rotation)
    }
}

/// Samples the local scale, or the lossy world scale when the predicate selects world space.
pub struct ScaleSampler<S: SceneGraph> {
    world_space: Option<WorldSpacePredicate<S>>,
}

impl<S: SceneGraph> ScaleSampler<S> {
    pub fn new(world_space: Option<WorldSpacePredicate<S>>) -> Self {
        Self { world_space }
    }
}

impl<S: SceneGraph> Sampler<S> for ScaleSampler<S> {
    type Target = TransformRef;
    type Data = [f32; 3];

    fn property_name(&self) -> &str {
        SCALE
    }

    fn interpolation(&self) -> Interpolation {
        Interpolation::Linear
    }

    fn target_of(&self, scene: &S, node: S::Node) -> Option<TransformRef> {
        transform_target(scene, node)
    }

    fn read(&self, scene: &S, node: S::Node, _: &TransformRef) -> Option<[f32; 3]> {
        transform_in_space(scene, node, self.world_space.as_ref()).map(|t| t.scale)
    }
}
