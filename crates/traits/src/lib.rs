pub mod counter;
pub mod localization;

pub use counter::{CounterError, InMemoryCounter, InvoiceCounter, next_invoice_number};
pub use localization::{BuiltinLocalizer, FnLocalizer, LabelKey, Localizer};
