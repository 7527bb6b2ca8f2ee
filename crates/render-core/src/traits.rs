use crate::error::RenderError;
use invoice_layout::{Stroke, TextStyle};
use invoice_types::{Color, Point, Rect, RasterAsset};

/// The drawing capability the renderer paints through.
///
/// Coordinates are page units with a top-left origin. Text origins are the
/// left end of the baseline. Images arrive already scaled to the size of
/// `dest`.
pub trait GraphicsContext {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError>;

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) -> Result<(), RenderError>;

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), RenderError>;

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) -> Result<(), RenderError>;

    fn draw_image(&mut self, image: &RasterAsset, dest: Rect, opacity: f32) -> Result<(), RenderError>;
}
