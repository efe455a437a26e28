//! Error types for the renderer.

use thiserror::Error;

/// Errors that can occur while configuring or running a render.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Invalid render settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Encoding or writing the output image failed.
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
