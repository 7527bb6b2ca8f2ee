use crate::decorate;
use crate::format::{format_currency, format_quantity, labelled};
use crate::metrics::*;
use crate::output::{DrawCommand, PageLayout, TextRole, TextRun};
use crate::placement;
use crate::style::TextStyle;
use invoice_traits::{LabelKey, Localizer};
use invoice_types::{Color, InvoiceDocument, Point, Rect};

/// Turns an [`InvoiceDocument`] into the absolute draw commands of one page.
///
/// Commands are emitted in paint order: background, watermark, text,
/// vector decoration, then the signature layer.
#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine<'a> {
    localizer: &'a dyn Localizer,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(localizer: &'a dyn Localizer) -> Self {
        Self { localizer }
    }

    pub fn layout(&self, document: &InvoiceDocument) -> PageLayout {
        let table = TableGeometry::for_rows(document.lines.len());
        let mut commands = Vec::with_capacity(16 + document.lines.len() * 4);

        commands.push(DrawCommand::FillRect {
            rect: Rect::new(0.0, 0.0, PAGE.width, PAGE.height),
            color: Color::WHITE,
        });
        commands.push(placement::watermark());

        self.layout_text(document, &table, &mut commands);
        decorate::decorate(document.template_variant, &table, &mut commands);

        commands.push(placement::signature());
        commands.push(self.text(
            self.label(document, LabelKey::Signature),
            SIGNATURE_LABEL_X,
            SIGNATURE_LABEL_Y,
            TextStyle::BODY,
            TextRole::SignatureLabel,
        ));

        log::debug!(
            "Laid out invoice '{}' with {} rows ({} commands)",
            document.invoice_number,
            document.lines.len(),
            commands.len()
        );

        PageLayout {
            size: PAGE,
            commands,
        }
    }

    fn layout_text(
        &self,
        document: &InvoiceDocument,
        table: &TableGeometry,
        commands: &mut Vec<DrawCommand>,
    ) {
        commands.push(self.text(
            self.label(document, LabelKey::BusinessName),
            MARGIN_LEFT,
            HEADER_Y,
            TextStyle::HEADER,
            TextRole::BusinessName,
        ));
        commands.push(self.text(
            labelled(
                &self.label(document, LabelKey::InvoiceNumber),
                &document.invoice_number,
            ),
            MARGIN_LEFT,
            INVOICE_NUMBER_Y,
            TextStyle::BODY,
            TextRole::InvoiceNumber,
        ));
        commands.push(self.text(
            labelled(&self.label(document, LabelKey::BillTo), &document.customer_name),
            MARGIN_LEFT,
            CUSTOMER_Y,
            TextStyle::BODY,
            TextRole::Customer,
        ));

        for (key, x) in [
            (LabelKey::Item, COL_DESCRIPTION_X),
            (LabelKey::Quantity, COL_QUANTITY_HEADER_X),
            (LabelKey::Price, COL_PRICE_X),
            (LabelKey::Total, COL_TOTAL_X),
        ] {
            commands.push(self.text(
                self.label(document, key),
                x,
                TABLE_HEADER_Y,
                TextStyle::BODY_BOLD,
                TextRole::ColumnHeader,
            ));
        }

        for (index, line) in document.lines.iter().enumerate() {
            let y = table.row_baseline(index);
            commands.push(self.text(
                line.description.clone(),
                COL_DESCRIPTION_X,
                y,
                TextStyle::BODY,
                TextRole::ItemDescription,
            ));
            commands.push(self.text(
                format_quantity(line.quantity),
                COL_QUANTITY_X,
                y,
                TextStyle::BODY,
                TextRole::ItemQuantity,
            ));
            commands.push(self.text(
                format_currency(line.unit_price),
                COL_PRICE_X,
                y,
                TextStyle::BODY,
                TextRole::ItemPrice,
            ));
            commands.push(self.text(
                format_currency(line.line_total()),
                COL_TOTAL_X,
                y,
                TextStyle::BODY,
                TextRole::ItemTotal,
            ));
        }

        if table.grand_total_baseline() > FOOTER_Y {
            log::warn!(
                "Invoice '{}' has {} rows; the table runs into the footer area",
                document.invoice_number,
                document.lines.len()
            );
        }

        let grand_total_y = table.grand_total_baseline();
        commands.push(self.text(
            format!("{}:", self.label(document, LabelKey::GrandTotal)),
            COL_PRICE_X,
            grand_total_y,
            TextStyle::BODY_BOLD,
            TextRole::GrandTotalLabel,
        ));
        commands.push(self.text(
            format_currency(document.grand_total()),
            COL_TOTAL_X,
            grand_total_y,
            TextStyle::BODY_BOLD,
            TextRole::GrandTotalValue,
        ));

        let footer = if document.footer_text.trim().is_empty() {
            self.label(document, LabelKey::FooterContact)
        } else {
            document.footer_text.clone()
        };
        commands.push(self.text(
            footer,
            MARGIN_LEFT,
            FOOTER_Y,
            TextStyle::BODY,
            TextRole::Footer,
        ));
    }

    fn label(&self, document: &InvoiceDocument, key: LabelKey) -> String {
        self.localizer
            .text(document.language_code, key)
            .into_owned()
    }

    fn text(&self, text: String, x: f32, y: f32, style: TextStyle, role: TextRole) -> DrawCommand {
        DrawCommand::Text(TextRun {
            text,
            origin: Point::new(x, y),
            style,
            role,
        })
    }
}
