//! Built-in samplers.

mod base_color;
mod blend_weights;
mod transform;
mod visibility;

pub use base_color::BaseColorSampler;
pub use blend_weights::BlendWeightSampler;
pub use transform::{RotationSampler, ScaleSampler, TranslationSampler};
pub use visibility::VisibilitySampler;

/// Curve name of the translation sampler.
pub const TRANSLATION: &str = "translation";
/// Curve name of the rotation sampler.
pub const ROTATION: &str = "rotation";
/// Curve name of the scale sampler; visibility is merged into curves with this name.
pub const SCALE: &str = "scale";
/// Curve name of the blend weight sampler.
pub const WEIGHTS: &str = "weights";
/// Curve name of the material base color sampler.
pub const BASE_COLOR_FACTOR: &str = "baseColorFactor";
