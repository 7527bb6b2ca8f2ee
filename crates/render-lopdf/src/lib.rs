//! Single-page PDF serializer using lopdf.
//!
//! [`LopdfCanvas`] implements the `GraphicsContext` drawing capability on top
//! of a `lopdf` document: text in the standard Helvetica faces, shaped
//! Kannada and Devanagari runs in embedded TrueType fonts, stroked and filled
//! paths, and RGB images with soft masks and constant opacity.

mod canvas;
pub mod encoding;
pub mod fonts;
mod image;
pub mod metadata;

pub use canvas::{CanvasOptions, LopdfCanvas};
pub use encoding::{GlyphPolicy, encode_win_ansi};
pub use fonts::{FontSet, Script, ScriptFont};
pub use metadata::{DocumentInfo, pdf_date};

use invoice_layout::PageLayout;
use invoice_render_core::{RasterLayers, RenderError, paint_layout};

/// Paints `layout` onto a fresh canvas and returns the serialized document.
pub fn serialize_layout(
    layout: &PageLayout,
    layers: &RasterLayers,
    options: CanvasOptions,
    fonts: &FontSet,
    info: &DocumentInfo,
) -> Result<Vec<u8>, RenderError> {
    let mut canvas = LopdfCanvas::new(layout.size, options).with_fonts(fonts.clone());
    paint_layout(layout, layers, &mut canvas)?;
    let bytes = canvas.finish(info)?;
    log::debug!("Serialized page to {} bytes", bytes.len());
    Ok(bytes)
}
