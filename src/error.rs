//! Error types for the scene renderer
//!
//! Rendering itself is infallible by construction (fonts fall back to
//! placeholder glyphs); errors come from canvas allocation and from the
//! export boundary (filesystem, encoders).

use thiserror::Error;

/// Custom error type for renderer operations
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Cannot allocate {width}x{height} canvas")]
    CanvasAllocation { width: u32, height: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Encoding(#[from] image::ImageError),
}

/// Result type alias for renderer operations
pub type RenderResult<T> = Result<T, RenderError>;
