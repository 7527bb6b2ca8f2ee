//! Localized label lookup.
//!
//! The renderer never owns its strings: every label is requested from a
//! [`Localizer`] for the document's language during a single render call.

use invoice_types::LanguageCode;
use std::borrow::Cow;
use std::fmt::Debug;

/// Keys for every piece of fixed text printed on an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKey {
    BusinessName,
    InvoiceNumber,
    BillTo,
    Item,
    Quantity,
    Price,
    Total,
    GrandTotal,
    Signature,
    FooterContact,
}

impl LabelKey {
    pub const ALL: [LabelKey; 10] = [
        LabelKey::BusinessName,
        LabelKey::InvoiceNumber,
        LabelKey::BillTo,
        LabelKey::Item,
        LabelKey::Quantity,
        LabelKey::Price,
        LabelKey::Total,
        LabelKey::GrandTotal,
        LabelKey::Signature,
        LabelKey::FooterContact,
    ];
}

/// A pure `(language, key) -> text` lookup supplied by the host.
pub trait Localizer: Send + Sync + Debug {
    fn text(&self, language: LanguageCode, key: LabelKey) -> Cow<'_, str>;
}

/// The strings shipped with the renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLocalizer;

impl Localizer for BuiltinLocalizer {
    fn text(&self, language: LanguageCode, key: LabelKey) -> Cow<'_, str> {
        Cow::Borrowed(builtin_text(language, key))
    }
}

fn builtin_text(language: LanguageCode, key: LabelKey) -> &'static str {
    use LabelKey::*;
    match language {
        LanguageCode::En => match key {
            BusinessName => "VTM Events & Decorations",
            InvoiceNumber => "Invoice No",
            BillTo => "Bill To",
            Item => "Item",
            Quantity => "Qty",
            Price => "Price",
            Total => "Total",
            GrandTotal => "Grand Total",
            Signature => "Authorized Signature",
            FooterContact => "Thank you for your business!",
        },
        LanguageCode::Kn => match key {
            BusinessName => "ವಿಟಿಎಂ ಈವೆಂಟ್ಸ್ ಮತ್ತು ಅಲಂಕಾರ",
            InvoiceNumber => "ಸರಕುಪಟ್ಟಿ ಸಂಖ್ಯೆ",
            BillTo => "ಗ್ರಾಹಕರು",
            Item => "ವಸ್ತು",
            Quantity => "ಪ್ರಮಾಣ",
            Price => "ಬೆಲೆ",
            Total => "ಒಟ್ಟು",
            GrandTotal => "ಒಟ್ಟು ಮೊತ್ತ",
            Signature => "ಅಧಿಕೃತ ಸಹಿ",
            FooterContact => "ನಿಮ್ಮ ವ್ಯವಹಾರಕ್ಕೆ ಧನ್ಯವಾದಗಳು",
        },
        LanguageCode::Mr => match key {
            BusinessName => "व्हीटीएम इव्हेंट्स आणि सजावट",
            InvoiceNumber => "बीजक क्रमांक",
            BillTo => "ग्राहक",
            Item => "वस्तू",
            Quantity => "नग",
            Price => "किंमत",
            Total => "एकूण",
            GrandTotal => "एकूण रक्कम",
            Signature => "अधिकृत सही",
            FooterContact => "आपल्या व्यवसायाबद्दल धन्यवाद",
        },
    }
}

/// Adapts a plain function or closure into a [`Localizer`].
pub struct FnLocalizer<F>(pub F);

impl<F> Debug for FnLocalizer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnLocalizer")
    }
}

impl<F> Localizer for FnLocalizer<F>
where
    F: Fn(LanguageCode, LabelKey) -> String + Send + Sync,
{
    fn text(&self, language: LanguageCode, key: LabelKey) -> Cow<'_, str> {
        Cow::Owned((self.0)(language, key))
    }
}
