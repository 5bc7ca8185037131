//! Adapter exposing a [`LoggingBackend`] through the `log` crate facade
//!
//! Record targets become logger names, with module paths (`app::db::pool`)
//! mapped to dotted names (`app.db.pool`), so the usual per-name
//! configuration applies to `log::info!` and friends.

use crate::core::{diagnostics, LogEvent, LogLevel, LoggerError, LoggingBackend, Result};
use std::borrow::Cow;
use std::sync::Arc;

/// `log::Log` implementation backed by a [`LoggingBackend`].
#[derive(Debug, Clone)]
pub struct LogAdapter {
    backend: Arc<LoggingBackend>,
}

impl LogAdapter {
    pub fn new(backend: Arc<LoggingBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Arc<LoggingBackend> {
        &self.backend
    }
}

/// Map a `log` target to a logger name.
pub fn logger_name(target: &str) -> Cow<'_, str> {
    if target.contains("::") {
        Cow::Owned(target.replace("::", "."))
    } else {
        Cow::Borrowed(target)
    }
}

impl log::Log for LogAdapter {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.backend
            .get_logger(&logger_name(metadata.target()))
            .is_enabled(LogLevel::from(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        let logger = self.backend.get_logger(&logger_name(record.target()));
        let level = LogLevel::from(record.level());
        if !logger.is_enabled(level) {
            return;
        }

        // Already formatted by the facade; no placeholders remain to fill.
        let message = match record.args().as_str() {
            Some(text) => text.to_string(),
            None => record.args().to_string(),
        };
        logger.emit(LogEvent::new(level, message));
    }

    fn flush(&self) {
        if let Err(e) = self.backend.flush() {
            diagnostics::error(format_args!("Facade flush failed: {}", e));
        }
    }
}

/// Install `backend` as the process-wide `log` logger.
///
/// The facade's max level is opened to TRACE; filtering happens per logger
/// name. Fails if a `log` logger is already installed.
pub fn install(backend: Arc<LoggingBackend>) -> Result<()> {
    log::set_boxed_logger(Box::new(LogAdapter::new(backend)))
        .map_err(|e| LoggerError::config("facade", e.to_string()))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
