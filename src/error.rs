// src/error.rs
use crate::config::ConfigError;
use invoice_render_core::RenderError;
use invoice_traits::CounterError;
use thiserror::Error;

/// Errors surfaced by the host-facing entry points (CLI, config, counter).
///
/// The render path itself only ever fails with [`RenderError`].
#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invoice counter error: {0}")]
    Counter(#[from] CounterError),

    #[error("Invalid invoice data: {0}")]
    Data(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
