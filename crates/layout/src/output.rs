//! Output types from the layout engine.
//!
//! A [`PageLayout`] is the complete, ordered list of draw commands for the
//! single invoice page. Raster content is referenced by [`ImageSlot`] and
//! resolved to pixels at paint time.

use crate::style::{Stroke, TextStyle};
use invoice_types::{Color, Point, Rect, Size};

/// What a text run represents on the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRole {
    BusinessName,
    InvoiceNumber,
    Customer,
    ColumnHeader,
    ItemDescription,
    ItemQuantity,
    ItemPrice,
    ItemTotal,
    GrandTotalLabel,
    GrandTotalValue,
    Footer,
    SignatureLabel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Left end of the baseline.
    pub origin: Point,
    pub style: TextStyle,
    pub role: TextRole,
}

/// Which raster a placement refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    Watermark,
    Signature,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
    Text(TextRun),
    Line { from: Point, to: Point, stroke: Stroke },
    StrokeRect { rect: Rect, stroke: Stroke },
    Image { slot: ImageSlot, dest: Rect, opacity: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub size: Size,
    pub commands: Vec<DrawCommand>,
}

impl PageLayout {
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text(run) => Some(run),
            _ => None,
        })
    }

    pub fn runs_with_role(&self, role: TextRole) -> impl Iterator<Item = &TextRun> {
        self.text_runs().filter(move |run| run.role == role)
    }

    pub fn image_placement(&self, slot: ImageSlot) -> Option<(Rect, f32)> {
        self.commands.iter().find_map(|cmd| match cmd {
            DrawCommand::Image {
                slot: s,
                dest,
                opacity,
            } if *s == slot => Some((*dest, *opacity)),
            _ => None,
        })
    }
}
