//! Error types for the animator.

use thiserror::Error;

/// Errors that can occur while configuring or driving an animation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimError {
    /// Frame range is empty or has zero total frames.
    #[error("invalid frame range {min}..={max}")]
    InvalidFrameRange {
        /// First frame.
        min: u32,
        /// Last frame.
        max: u32,
    },

    /// Start and end captures disagree in size; both were discarded.
    #[error("keyframe count mismatch: {start} start vs {end} end, captures cleared")]
    KeyframeMismatch {
        /// Start keyframe count.
        start: usize,
        /// End keyframe count.
        end: usize,
    },

    /// Requested frame lies outside the frame range.
    #[error("frame {frame} outside {min}..={max}")]
    FrameOutOfRange {
        /// Requested frame.
        frame: u32,
        /// First frame.
        min: u32,
        /// Last frame.
        max: u32,
    },
}

/// Result type for animator operations.
pub type Result<T> = std::result::Result<T, AnimError>;
