use crate::interpolation::Interpolation;
use crate::sampler::Sampler;
use crate::scene::{MaterialRef, SceneGraph};
use crate::value::ColorRgba;

use super::BASE_COLOR_FACTOR;

/// Material color properties probed in order; the first one present wins.
const COLOR_PROPERTIES: [&str; 3] = ["_BaseColor", "_Color", BASE_COLOR_FACTOR];

/// Base color of the node's primary material, exported as an animation pointer curve.
#[derive(Copy, Clone, Debug, Default)]
pub struct BaseColorSampler;

impl<S: SceneGraph> Sampler<S> for BaseColorSampler {
    type Target = MaterialRef;
    type Data = ColorRgba;

    fn property_name(&self) -> &str {
        BASE_COLOR_FACTOR
    }

    fn interpolation(&self) -> Interpolation {
        Interpolation::Linear
    }

    fn target_of(&self, scene: &S, node: S::Node) -> Option<MaterialRef> {
        scene.has_material(node).then_some(MaterialRef)
    }

    fn read(&self, scene: &S, node: S::Node, _: &MaterialRef) -> Option<ColorRgba> {
        COLOR_PROPERTIES
            .iter()
            .find_map(|property| scene.material_color(node, property))
            .map(ColorRgba)
    }
}
