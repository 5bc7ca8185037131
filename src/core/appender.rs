//! Appender trait for record sinks

use super::error::Result;

/// Destination for rendered records.
///
/// Records arrive fully rendered and without a line terminator. Appenders are
/// shared between threads, so implementations synchronize internally and
/// must write each record as one unit.
pub trait Appender: Send + Sync {
    fn append(&self, record: &str) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}
