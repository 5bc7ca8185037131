//! In-memory appender
//!
//! Keeps every record in a `Vec<String>` instead of writing it anywhere.
//! Useful for tests that assert on rendered output, and for hosts that
//! collect records themselves.

use crate::core::{Appender, Result};
use parking_lot::Mutex;

/// Captures records in memory.
///
/// # Example
///
/// ```
/// use eazy_logging::appenders::MemoryAppender;
/// use eazy_logging::Appender;
///
/// let appender = MemoryAppender::new();
/// appender.append("first").unwrap();
/// assert_eq!(appender.take(), vec!["first".to_string()]);
/// assert!(appender.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MemoryAppender {
    records: Mutex<Vec<String>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the records captured so far.
    pub fn records(&self) -> Vec<String> {
        self.records.lock().clone()
    }

    /// Remove and return the captured records.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.records.lock())
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// All records joined by newlines, as a stream appender would have
    /// written them.
    pub fn contents(&self) -> String {
        let records = self.records.lock();
        let mut out = String::new();
        for record in records.iter() {
            out.push_str(record);
            out.push('\n');
        }
        out
    }
}

impl Appender for MemoryAppender {
    fn append(&self, record: &str) -> Result<()> {
        self.records.lock().push(record.to_string());
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
