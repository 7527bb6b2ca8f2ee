//! Core rendering abstractions for invoice generation.
//!
//! This crate provides the pieces shared by every rendering backend:
//! - `GraphicsContext`, the drawing capability a backend implements
//! - `RenderError`, covering asset, I/O and encoding failures
//! - raster compositing (scaling and slot resolution) and layout replay
//! - `RecordingContext`, a headless backend that records draw calls

pub mod compositor;
mod error;
pub mod recording;
mod traits;
pub mod utils;

pub use compositor::{RasterLayers, paint_layout, scale_to};
pub use error::RenderError;
pub use recording::{RecordedOp, RecordingContext};
pub use traits::GraphicsContext;
