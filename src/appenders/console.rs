//! Console appender implementation

use crate::core::{Appender, Result};
use std::io::{self, Write};

/// Which process stream a [`ConsoleAppender`] writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleTarget {
    #[default]
    Stderr,
    Stdout,
}

/// Writes one record per line to stderr (default) or stdout.
///
/// The stream lock is held for the whole record, so concurrent records never
/// interleave.
#[derive(Debug, Default)]
pub struct ConsoleAppender {
    target: ConsoleTarget,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stdout() -> Self {
        Self {
            target: ConsoleTarget::Stdout,
        }
    }

    /// Select the target stream
    ///
    /// # Example
    ///
    /// ```
    /// use eazy_logging::appenders::{ConsoleAppender, ConsoleTarget};
    ///
    /// let appender = ConsoleAppender::new().with_target(ConsoleTarget::Stdout);
    /// assert_eq!(appender.target(), ConsoleTarget::Stdout);
    /// ```
    #[must_use]
    pub fn with_target(mut self, target: ConsoleTarget) -> Self {
        self.target = target;
        self
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }
}

fn write_line(mut out: impl Write, record: &str) -> io::Result<()> {
    let mut line = String::with_capacity(record.len() + 1);
    line.push_str(record);
    line.push('\n');
    out.write_all(line.as_bytes())
}

impl Appender for ConsoleAppender {
    fn append(&self, record: &str) -> Result<()> {
        match self.target {
            ConsoleTarget::Stderr => write_line(io::stderr().lock(), record)?,
            ConsoleTarget::Stdout => write_line(io::stdout().lock(), record)?,
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stderr => io::stderr().flush()?,
            ConsoleTarget::Stdout => io::stdout().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
