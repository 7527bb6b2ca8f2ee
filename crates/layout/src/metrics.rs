//! Fixed page geometry. All values are in page units (1/72 inch), origin top-left.

use invoice_types::{A4, Rect, Size};

pub const PAGE: Size = A4;

pub const MARGIN_LEFT: f32 = 40.0;
pub const RULE_RIGHT: f32 = 555.0;

pub const HEADER_Y: f32 = 60.0;
pub const INVOICE_NUMBER_Y: f32 = 90.0;
pub const CUSTOMER_Y: f32 = 110.0;

pub const TABLE_HEADER_Y: f32 = 140.0;
pub const HEADER_RULE_Y: f32 = 152.0;
pub const FIRST_ROW_Y: f32 = 168.0;
pub const ROW_HEIGHT: f32 = 18.0;

pub const COL_DESCRIPTION_X: f32 = 40.0;
pub const COL_QUANTITY_HEADER_X: f32 = 330.0;
pub const COL_QUANTITY_X: f32 = 340.0;
pub const COL_PRICE_X: f32 = 380.0;
pub const COL_TOTAL_X: f32 = 470.0;

pub const TOTALS_RULE_LEFT: f32 = 320.0;
pub const TOTALS_RULE_GAP: f32 = 10.0;
pub const GRAND_TOTAL_GAP: f32 = 28.0;

pub const FOOTER_Y: f32 = 800.0;

pub const WATERMARK_SIZE: Size = Size::new(260.0, 260.0);
/// 35/255, roughly 14%.
pub const WATERMARK_OPACITY: f32 = 35.0 / 255.0;

pub const SIGNATURE_RECT: Rect = Rect::new(400.0, 760.0, 140.0, 40.0);
pub const SIGNATURE_LABEL_X: f32 = 400.0;
pub const SIGNATURE_LABEL_Y: f32 = 820.0;

pub const BORDER_INSET: f32 = 20.0;

/// Vertical positions of the item table for a given number of rows.
///
/// Rows are never wrapped or moved to another page; a long table simply
/// runs past the footer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableGeometry {
    rows: usize,
}

impl TableGeometry {
    pub fn for_rows(rows: usize) -> Self {
        Self { rows }
    }

    pub fn row_baseline(&self, index: usize) -> f32 {
        FIRST_ROW_Y + ROW_HEIGHT * index as f32
    }

    /// Cursor position after the last row has been placed.
    pub fn cursor_after_rows(&self) -> f32 {
        self.row_baseline(self.rows)
    }

    pub fn totals_rule_y(&self) -> f32 {
        self.cursor_after_rows() + TOTALS_RULE_GAP
    }

    pub fn grand_total_baseline(&self) -> f32 {
        self.cursor_after_rows() + GRAND_TOTAL_GAP
    }
}
