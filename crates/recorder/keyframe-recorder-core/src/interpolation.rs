//! Curve interpolation modes understood by the interchange format.

use serde::{Deserialize, Serialize};

/// Interpolation attached to every exported curve.
///
/// Only `Linear` and `Step` are ever produced by the recorder; the spline modes are
/// representable so custom samplers can declare them and sinks can pass them through.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Interpolation {
    #[default]
    Linear,
    Step,
    #[serde(rename = "CATMULLROMSPLINE")]
    CatmullRomSpline,
    #[serde(rename = "CUBICSPLINE")]
    CubicSpline,
}

impl Interpolation {
    /// Name used by glTF `animation.sampler.interpolation`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interpolation::Linear => "LINEAR",
            Interpolation::Step => "STEP",
            Interpolation::CatmullRomSpline => "CATMULLROMSPLINE",
            Interpolation::CubicSpline => "CUBICSPLINE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_names_match_as_str() {
        for mode in [
            Interpolation::Linear,
            Interpolation::Step,
            Interpolation::CatmullRomSpline,
            Interpolation::CubicSpline,
        ] {
            let json = serde_json::to_value(mode).unwrap();
            assert_eq!(json, serde_json::Value::String(mode.as_str().to_string()));
        }
    }
}
