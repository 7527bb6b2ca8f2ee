use chrono::{DateTime, Utc};

/// Contents of the document information dictionary.
///
/// `creation_date` is the only field that varies between otherwise
/// identical renders; leave it `None` for byte-stable output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub producer: String,
    pub creation_date: Option<DateTime<Utc>>,
}

impl DocumentInfo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            producer: concat!("invoice-render-lopdf ", env!("CARGO_PKG_VERSION")).to_string(),
            creation_date: None,
        }
    }

    pub fn with_creation_date(mut self, date: DateTime<Utc>) -> Self {
        self.creation_date = Some(date);
        self
    }
}

/// Formats a timestamp as a PDF date string (`D:YYYYMMDDHHmmSSZ`).
pub fn pdf_date(date: &DateTime<Utc>) -> String {
    date.format("D:%Y%m%d%H%M%SZ").to_string()
}
