//! Renders invoices into single-page A4 PDF documents.
//!
//! The pipeline is split across the workspace crates: `invoice-layout` turns an
//! [`InvoiceDocument`] into positioned draw commands, `invoice-render-core`
//! composites the watermark and signature rasters, and `invoice-render-lopdf`
//! serializes the page. This crate wires them together behind
//! [`InvoiceRenderer`] and adds output sinks, configuration and a file-backed
//! invoice counter.
//!
//! ```no_run
//! use vtm_invoice::{InvoiceDocument, InvoiceLine, OutputSink};
//!
//! let invoice = InvoiceDocument::new("VTM-2026-001", "Asha Rao")
//!     .with_line(InvoiceLine::new("Stage Decoration", 1, 5000));
//! let rendered = vtm_invoice::render(&invoice, None, &OutputSink::file("invoice.pdf"))?;
//! assert!(rendered.bytes.starts_with(b"%PDF"));
//! # Ok::<(), vtm_invoice::RenderError>(())
//! ```

pub mod config;
pub mod counter;
mod error;
pub mod fonts;
mod renderer;
pub mod sink;
pub mod watermark;

pub use config::{ConfigError, RendererConfig, ScriptFontPaths};
pub use counter::FileCounter;
pub use error::InvoiceError;
pub use renderer::{InvoiceRenderer, InvoiceRendererBuilder, Timestamp};
pub use sink::{OutputSink, RenderedDocument};

pub use invoice_layout::{PageLayout, TextRole};
pub use invoice_render_core::{GraphicsContext, RecordingContext, RenderError};
pub use invoice_render_lopdf::{FontSet, GlyphPolicy, Script, ScriptFont};
pub use invoice_traits::{
    BuiltinLocalizer, CounterError, FnLocalizer, InMemoryCounter, InvoiceCounter, LabelKey, Localizer,
    next_invoice_number,
};
pub use invoice_types::{
    AssetError, InvoiceDocument, InvoiceLine, LanguageCode, RasterAsset, TemplateVariant,
};

/// Renders `document` with the default renderer and writes it to `sink`.
pub fn render(
    document: &InvoiceDocument,
    signature: Option<&RasterAsset>,
    sink: &OutputSink,
) -> Result<RenderedDocument, RenderError> {
    InvoiceRenderer::new()?.render(document, signature, sink)
}
