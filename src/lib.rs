//! Teachers Day airplane scene renderer
//!
//! Builds a declarative description of a fixed celebratory scene (a passenger
//! airplane in a gradient sky with clouds, a trailing banner and greeting
//! text) and rasterizes it to PNG and JPEG files.
//!
//! The scene description is a plain value separate from rasterization, so the
//! artwork can be inspected and tested without touching a pixel buffer.

pub mod artwork;
pub mod canvas;
pub mod error;
pub mod font;
pub mod gradient;
pub mod renderer;
pub mod scene;
pub mod types;

pub use error::{RenderError, RenderResult};
pub use renderer::Renderer;
pub use scene::Scene;
