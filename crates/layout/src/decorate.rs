//! Separator rules and the template border.

use crate::metrics::*;
use crate::output::DrawCommand;
use crate::style::Stroke;
use invoice_types::{Point, Rect, TemplateVariant};

pub fn decorate(template: TemplateVariant, table: &TableGeometry, commands: &mut Vec<DrawCommand>) {
    commands.push(DrawCommand::Line {
        from: Point::new(MARGIN_LEFT, HEADER_RULE_Y),
        to: Point::new(RULE_RIGHT, HEADER_RULE_Y),
        stroke: Stroke::HAIRLINE,
    });

    let totals_y = table.totals_rule_y();
    commands.push(DrawCommand::Line {
        from: Point::new(TOTALS_RULE_LEFT, totals_y),
        to: Point::new(RULE_RIGHT, totals_y),
        stroke: Stroke::HAIRLINE,
    });

    if let Some(rect) = border_rect(template) {
        commands.push(DrawCommand::StrokeRect {
            rect,
            stroke: Stroke::BORDER,
        });
    }
}

/// The inset page border, drawn only for the classic template.
pub fn border_rect(template: TemplateVariant) -> Option<Rect> {
    match template {
        TemplateVariant::Classic => Some(Rect::from_corners(
            BORDER_INSET,
            BORDER_INSET,
            PAGE.width - BORDER_INSET,
            PAGE.height - BORDER_INSET,
        )),
        TemplateVariant::Modern => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_border_is_inset_twenty_units() {
        let rect = border_rect(TemplateVariant::Classic).unwrap();
        assert_eq!((rect.x, rect.y), (20.0, 20.0));
        assert_eq!((rect.right(), rect.bottom()), (575.0, 822.0));
        assert_eq!(border_rect(TemplateVariant::Modern), None);
    }

    #[test]
    fn modern_emits_only_rules() {
        let mut commands = Vec::new();
        decorate(TemplateVariant::Modern, &TableGeometry::for_rows(2), &mut commands);
        assert_eq!(commands.len(), 2);
        assert!(commands.iter().all(|c| matches!(c, DrawCommand::Line { .. })));
    }
}
