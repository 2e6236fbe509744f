//! Recorder configuration.

use serde::{Deserialize, Serialize};

/// Which properties are recorded and how the export is post-processed.
/// Behavioural hooks that cannot be serialized (world-space predicate, custom samplers,
/// observers) are supplied through [`RecorderBuilder`](crate::recorder::RecorderBuilder).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Name of the animation handed to the sink with every curve.
    pub animation_name: String,
    /// Record the active state of every object; merged into `scale` on export.
    pub record_visibility: bool,
    /// Record blend shape weights of skinned meshes.
    pub record_blend_shapes: bool,
    /// Record material properties (base color) as animation pointer curves.
    pub record_animation_pointer: bool,
    /// Run the keyframe reducer on every curve before it reaches the sink.
    pub remove_redundant_keyframes: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            animation_name: "Recording".to_string(),
            record_visibility: false,
            record_blend_shapes: true,
            record_animation_pointer: false,
            remove_redundant_keyframes: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: RecorderConfig =
            serde_json::from_str(r#"{ "record_visibility": true }"#).unwrap();
        assert!(cfg.record_visibility);
        assert!(cfg.record_blend_shapes);
        assert_eq!(cfg.animation_name, "Recording");
    }
}
