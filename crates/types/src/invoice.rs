use serde::{Deserialize, Serialize};
use std::fmt;

/// A single billed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub description: String,
    pub quantity: u32,
    pub unit_price: u64,
}

impl InvoiceLine {
    pub fn new(description: impl Into<String>, quantity: u32, unit_price: u64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    /// `quantity × unit_price`, saturating at `u64::MAX`.
    pub fn line_total(&self) -> u64 {
        u64::from(self.quantity).saturating_mul(self.unit_price)
    }
}

/// Language used for the business name and labels.
///
/// Parsing never fails: any code other than `kn` or `mr` resolves to `En`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LanguageCode {
    #[default]
    En,
    Kn,
    Mr,
}

impl LanguageCode {
    pub fn parse(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "kn" => LanguageCode::Kn,
            "mr" => LanguageCode::Mr,
            _ => LanguageCode::En,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Kn => "kn",
            LanguageCode::Mr => "mr",
        }
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::parse(code)
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self::parse(&code)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual style. Only decorative elements differ between variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateVariant {
    #[default]
    Modern,
    Classic,
}

/// The invoice handed to the renderer. Treated as read-only once rendering starts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDocument {
    #[serde(default)]
    pub invoice_number: String,
    pub customer_name: String,
    #[serde(default)]
    pub lines: Vec<InvoiceLine>,
    #[serde(default)]
    pub footer_text: String,
    #[serde(default, alias = "language")]
    pub language_code: LanguageCode,
    #[serde(default, alias = "template")]
    pub template_variant: TemplateVariant,
}

impl InvoiceDocument {
    pub fn new(invoice_number: impl Into<String>, customer_name: impl Into<String>) -> Self {
        Self {
            invoice_number: invoice_number.into(),
            customer_name: customer_name.into(),
            ..Default::default()
        }
    }

    pub fn with_line(mut self, line: InvoiceLine) -> Self {
        self.lines.push(line);
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer_text = footer.into();
        self
    }

    pub fn with_language(mut self, language: LanguageCode) -> Self {
        self.language_code = language;
        self
    }

    pub fn with_template(mut self, template: TemplateVariant) -> Self {
        self.template_variant = template;
        self
    }

    /// Sum of all line totals, recomputed on every call.
    pub fn grand_total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |acc, line| acc.saturating_add(line.line_total()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_invoice() -> InvoiceDocument {
        InvoiceDocument::new("VTM-2026-001", "Asha Rao")
            .with_line(InvoiceLine::new("Stage Decoration", 1, 5000))
            .with_line(InvoiceLine::new("Sound System Setup", 1, 3000))
            .with_line(InvoiceLine::new("Lighting Arrangement", 1, 2000))
    }

    #[test]
    fn grand_total_sums_line_totals() {
        assert_eq!(event_invoice().grand_total(), 10000);
    }

    #[test]
    fn grand_total_tracks_line_edits() {
        let mut doc = event_invoice();
        doc.lines[0].quantity = 2;
        assert_eq!(doc.grand_total(), 15000);
        doc.lines.clear();
        assert_eq!(doc.grand_total(), 0);
    }

    #[test]
    fn zero_quantity_line_total_is_zero() {
        assert_eq!(InvoiceLine::new("Chairs", 0, 40).line_total(), 0);
    }

    #[test]
    fn line_total_saturates() {
        assert_eq!(InvoiceLine::new("Huge", u32::MAX, u64::MAX).line_total(), u64::MAX);
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(LanguageCode::parse("kn"), LanguageCode::Kn);
        assert_eq!(LanguageCode::parse("MR"), LanguageCode::Mr);
        assert_eq!(LanguageCode::parse("fr"), LanguageCode::En);
        assert_eq!(LanguageCode::parse(""), LanguageCode::En);
    }

    #[test]
    fn deserializes_from_camel_case_json() {
        let json = r#"{
            "invoiceNumber": "VTM-2026-007",
            "customerName": "Ravi",
            "lines": [{"description": "Tent", "quantity": 2, "unitPrice": 1500}],
            "footerText": "Thanks",
            "languageCode": "de",
            "templateVariant": "classic"
        }"#;
        let doc: InvoiceDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.language_code, LanguageCode::En);
        assert_eq!(doc.template_variant, TemplateVariant::Classic);
        assert_eq!(doc.grand_total(), 3000);
    }

    #[test]
    fn language_serializes_as_code() {
        let doc = InvoiceDocument::new("A", "B").with_language(LanguageCode::Mr);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["languageCode"], "mr");
        assert_eq!(json["templateVariant"], "modern");
    }
}
