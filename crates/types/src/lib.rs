pub mod color;
pub mod geometry;
pub mod invoice;
pub mod raster;

pub use color::Color;
pub use geometry::{A4, Point, Rect, Size};
pub use invoice::{InvoiceDocument, InvoiceLine, LanguageCode, TemplateVariant};
pub use raster::{AssetError, RasterAsset};
