//! A headless [`GraphicsContext`] that records calls instead of painting.

use crate::error::RenderError;
use crate::traits::GraphicsContext;
use invoice_layout::{Stroke, TextStyle};
use invoice_types::{Color, Point, Rect, RasterAsset};

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedOp {
    FillRect {
        rect: Rect,
        color: Color,
    },
    Text {
        text: String,
        origin: Point,
        style: TextStyle,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    StrokeRect {
        rect: Rect,
        stroke: Stroke,
    },
    Image {
        pixel_size: (u32, u32),
        dest: Rect,
        opacity: f32,
    },
}

#[derive(Debug, Default, Clone)]
pub struct RecordingContext {
    pub ops: Vec<RecordedOp>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, Point)> {
        self.ops.iter().filter_map(|op| match op {
            RecordedOp::Text { text, origin, .. } => Some((text.as_str(), *origin)),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = (&(u32, u32), &Rect, f32)> {
        self.ops.iter().filter_map(|op| match op {
            RecordedOp::Image {
                pixel_size,
                dest,
                opacity,
            } => Some((pixel_size, dest, *opacity)),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|(text, _)| text.contains(needle))
    }
}

impl GraphicsContext for RecordingContext {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        self.ops.push(RecordedOp::FillRect { rect, color });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) -> Result<(), RenderError> {
        self.ops.push(RecordedOp::Text {
            text: text.to_string(),
            origin,
            style: *style,
        });
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), RenderError> {
        self.ops.push(RecordedOp::Line {
            from,
            to,
            stroke: *stroke,
        });
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) -> Result<(), RenderError> {
        self.ops.push(RecordedOp::StrokeRect {
            rect,
            stroke: *stroke,
        });
        Ok(())
    }

    fn draw_image(&mut self, image: &RasterAsset, dest: Rect, opacity: f32) -> Result<(), RenderError> {
        self.ops.push(RecordedOp::Image {
            pixel_size: (image.width(), image.height()),
            dest,
            opacity,
        });
        Ok(())
    }
}
