//! Appender over an arbitrary writer

use crate::core::{Appender, LoggerError, Result};
use parking_lot::Mutex;
use std::io::{BufWriter, Write};

/// Writes one record per line to any `Write + Send` destination.
///
/// The writer is held behind a mutex so each record, terminator included,
/// goes out in a single `write_all`. Output is buffered unless built with
/// [`StreamAppender::unbuffered`]; [`Appender::flush`] drains the buffer.
pub struct StreamAppender {
    name: String,
    writer: Mutex<Option<Box<dyn Write + Send>>>,
}

impl StreamAppender {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self::from_boxed(Box::new(BufWriter::new(writer)))
    }

    pub fn unbuffered<W: Write + Send + 'static>(writer: W) -> Self {
        Self::from_boxed(Box::new(writer))
    }

    fn from_boxed(writer: Box<dyn Write + Send>) -> Self {
        Self {
            name: "stream".to_string(),
            writer: Mutex::new(Some(writer)),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Flush and release the writer. Later appends fail.
    pub fn close(&self) -> Result<()> {
        match self.writer.lock().take() {
            Some(mut writer) => writer.flush().map_err(|e| {
                LoggerError::io_operation("closing stream", format!("appender {}", self.name), e)
            }),
            None => Ok(()),
        }
    }
}

impl Appender for StreamAppender {
    fn append(&self, record: &str) -> Result<()> {
        let mut guard = self.writer.lock();
        let writer = guard
            .as_mut()
            .ok_or_else(|| LoggerError::writer(format!("{} appender is closed", self.name)))?;

        let mut line = String::with_capacity(record.len() + 1);
        line.push_str(record);
        line.push('\n');
        writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if let Some(writer) = self.writer.lock().as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for StreamAppender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamAppender")
            .field("name", &self.name)
            .field("open", &self.writer.lock().is_some())
            .finish()
    }
}

impl Drop for StreamAppender {
    fn drop(&mut self) {
        if let Some(writer) = self.writer.get_mut().as_mut() {
            let _ = writer.flush();
        }
    }
}
