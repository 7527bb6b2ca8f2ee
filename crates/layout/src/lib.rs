//! Fixed-position layout for a single A4 invoice page.
//!
//! The layout is not a flowing engine: every element is keyed to an absolute
//! coordinate or to its row index in the item table.

pub mod decorate;
pub(crate) mod engine;
pub mod format;
pub mod metrics;
pub mod output;
pub mod placement;
pub mod style;

pub use self::engine::LayoutEngine;
pub use self::format::{CURRENCY_GLYPH, format_currency};
pub use self::metrics::TableGeometry;
pub use self::output::{DrawCommand, ImageSlot, PageLayout, TextRole, TextRun};
pub use self::style::{FontWeight, Stroke, TextStyle};
