//! Error types for the recorder.

use thiserror::Error;

/// Errors reported by [`Recorder`](crate::recorder::Recorder).
///
/// Only [`RecorderError::MissingRoot`] is fatal; every other variant is a usage error
/// whose offending call was rejected without touching recorded data.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RecorderError {
    /// The scene graph does not contain the root passed to the builder.
    #[error("recording root {root} is not part of the scene")]
    MissingRoot { root: String },

    /// `update`/`update_for` was called without an active recording.
    #[error("recorder is not recording")]
    NotRecording,

    /// `start` was called while a recording is active.
    #[error("recorder is already recording (started at {started_at})")]
    AlreadyRecording { started_at: f64 },

    /// `export` was called before anything was recorded.
    #[error("no recording available to export")]
    NoRecording,

    /// A sample time that is not later than the previous one.
    #[error("cannot record backwards in time: {time} <= last recorded {last}")]
    NonMonotonicTime { time: f64, last: f64 },

    /// A sample time that is NaN or infinite.
    #[error("invalid time value: {time}")]
    InvalidTime { time: f64 },

    /// `update_for` received an object outside the recorded root.
    #[error("object {node} is not a descendant of the recording root")]
    NotUnderRoot { node: String },
}

impl RecorderError {
    /// Whether the recorder stays usable after this error.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::MissingRoot { .. })
    }
}

/// Recorder result type
pub type Result<T> = core::result::Result<T, RecorderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_root_is_fatal() {
        assert!(!RecorderError::MissingRoot { root: "0".into() }.is_recoverable());
        assert!(RecorderError::NotRecording.is_recoverable());
        assert!(RecorderError::NonMonotonicTime {
            time: 1.0,
            last: 2.0
        }
        .is_recoverable());
    }

    #[test]
    fn messages_name_the_offending_values() {
        let err = RecorderError::NonMonotonicTime {
            time: 1.0,
            last: 2.0,
        };
        assert_eq!(
            err.to_string(),
            "cannot record backwards in time: 1 <= last recorded 2"
        );
    }
}
