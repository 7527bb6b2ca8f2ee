//! File-backed invoice counter.

use crate::sink::write_atomically;
use chrono::{Datelike, Utc};
use invoice_traits::{CounterError, InvoiceCounter, next_invoice_number};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Debug, Default, Serialize, Deserialize)]
struct CounterState {
    last_invoice_no: Option<String>,
}

/// Keeps the last issued invoice number in a small JSON file.
///
/// A missing file reads as "nothing issued yet". Saves are atomic.
#[derive(Debug)]
pub struct FileCounter {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileCounter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    fn read_state(&self) -> Result<CounterState, CounterError> {
        match std::fs::read_to_string(&self.path) {
            Ok(source) if source.trim().is_empty() => Ok(CounterState::default()),
            Ok(source) => serde_json::from_str(&source)
                .map_err(|e| CounterError::Malformed(format!("{}: {}", self.path.display(), e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(CounterState::default()),
            Err(e) => Err(e.into()),
        }
    }
}

impl InvoiceCounter for FileCounter {
    fn load(&self) -> Result<Option<String>, CounterError> {
        let _lock = self.guard.lock().map_err(|_| CounterError::LockPoisoned)?;
        Ok(self.read_state()?.last_invoice_no)
    }

    fn save(&self, invoice_number: &str) -> Result<(), CounterError> {
        let _lock = self.guard.lock().map_err(|_| CounterError::LockPoisoned)?;
        let state = CounterState {
            last_invoice_no: Some(invoice_number.to_string()),
        };
        let json = serde_json::to_vec_pretty(&state).map_err(|e| CounterError::Malformed(e.to_string()))?;
        write_atomically(&self.path, &json)?;
        Ok(())
    }
}

/// The number that would be issued next in the current calendar year.
pub fn peek_next(counter: &dyn InvoiceCounter, prefix: &str) -> Result<String, CounterError> {
    let last = counter.load()?;
    Ok(next_invoice_number(last.as_deref(), prefix, Utc::now().year()))
}
