//! Persistence seam for the sequential invoice number.
//!
//! The renderer never reads or writes this state; hosts advance the counter
//! after a render succeeds.

use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CounterError {
    #[error("Counter storage I/O error: {0}")]
    Io(String),
    #[error("Counter storage is malformed: {0}")]
    Malformed(String),
    #[error("Counter store lock poisoned")]
    LockPoisoned,
}

impl From<std::io::Error> for CounterError {
    fn from(err: std::io::Error) -> Self {
        CounterError::Io(err.to_string())
    }
}

/// Stores the last issued invoice number (`PREFIX-YYYY-NNN`).
pub trait InvoiceCounter: Send + Sync + Debug {
    /// The last saved invoice number, or `None` if nothing was issued yet.
    fn load(&self) -> Result<Option<String>, CounterError>;

    fn save(&self, invoice_number: &str) -> Result<(), CounterError>;
}

/// A counter held in memory only.
#[derive(Debug, Default)]
pub struct InMemoryCounter {
    last: RwLock<Option<String>>,
}

impl InMemoryCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(invoice_number: impl Into<String>) -> Self {
        Self {
            last: RwLock::new(Some(invoice_number.into())),
        }
    }
}

impl InvoiceCounter for InMemoryCounter {
    fn load(&self) -> Result<Option<String>, CounterError> {
        let last = self.last.read().map_err(|_| CounterError::LockPoisoned)?;
        Ok(last.clone())
    }

    fn save(&self, invoice_number: &str) -> Result<(), CounterError> {
        let mut last = self.last.write().map_err(|_| CounterError::LockPoisoned)?;
        *last = Some(invoice_number.to_string());
        Ok(())
    }
}

/// Computes the number following `last`.
///
/// The trailing `-`-separated segment of `last` is parsed as the sequence;
/// a missing or malformed value starts the sequence at 1. The result uses the
/// given prefix and year and is zero-padded to at least three digits.
pub fn next_invoice_number(last: Option<&str>, prefix: &str, year: i32) -> String {
    let sequence = last
        .and_then(|value| value.rsplit('-').next())
        .and_then(|segment| segment.trim().parse::<u64>().ok())
        .unwrap_or(0);
    format!("{}-{}-{:03}", prefix, year, sequence.saturating_add(1))
}
