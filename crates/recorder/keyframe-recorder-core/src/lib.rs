//! Keyframe Recorder Core (engine-agnostic)
//!
//! Records the state of every object under a root node once per update into keyframe
//! tracks, folds object visibility into scale curves, drops redundant keyframes and
//! hands the finished curves to an [`AnimationSink`]. The host scene is reached only
//! through the [`SceneGraph`] trait.

pub mod config;
pub mod data;
pub mod error;
pub mod interpolation;
pub mod merge;
pub mod recorder;
pub mod reduce;
pub mod sampler;
pub mod samplers;
pub mod scene;
pub mod sink;
pub mod time;
pub mod track;
pub mod value;
pub mod visibility_track;

// Re-exports for hosts and sinks
pub use config::RecorderConfig;
pub use data::AnimationData;
pub use error::{RecorderError, Result};
pub use interpolation::Interpolation;
pub use merge::{merge_visibility_and_scale, MergedScaleCurve, ScaleSeries, VisibilitySeries};
pub use recorder::{Recorder, RecorderBuilder};
pub use reduce::{remove_unneeded_keyframes, remove_unneeded_strided_keyframes};
pub use sampler::{DynSampler, Sampler, SamplerRegistry, WorldSpacePredicate};
pub use scene::{SceneGraph, Transform};
pub use sink::{AnimationSink, Bounds, CurveCollector, ExportReport, ExportedCurve, RecordedCurve};
pub use time::{next_larger, next_smaller, FloatNeighbor};
pub use track::{AnimationTrack, RecordOutcome, Track};
pub use value::{ColorRgba, Quat, Value, ValueKind, Weights};
pub use visibility_track::VisibilityTrack;
