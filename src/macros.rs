//! Logging macros for `{}`-template records.
//!
//! Each argument is converted into a [`LogArg`](crate::LogArg) only when the
//! level is enabled, so disabled calls cost one comparison.
//!
//! # Examples
//!
//! ```
//! use eazy_logging::prelude::*;
//! use eazy_logging::{info, warn};
//!
//! let backend = LoggingBackend::builder().appender(MemoryAppender::new()).build();
//! let logger = backend.get_logger("app.Server");
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With placeholder arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // A trailing error becomes the record's error chain
//! let err = ErrorRecord::new("address in use");
//! warn!(logger, "Bind to {} failed", port, err);
//! ```

/// Log a record at an explicit level.
///
/// # Examples
///
/// ```
/// # use eazy_logging::prelude::*;
/// # let backend = LoggingBackend::builder().appender(MemoryAppender::new()).build();
/// # let logger = backend.get_logger("app");
/// use eazy_logging::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        let logger = &$logger;
        let level = $level;
        if logger.is_enabled(level) {
            logger.log(level, $template, &[$($crate::LogArg::from($arg)),*]);
        }
    }};
}

/// Log a trace-level record.
///
/// # Examples
///
/// ```
/// # use eazy_logging::prelude::*;
/// # let backend = LoggingBackend::builder().appender(MemoryAppender::new()).build();
/// # let logger = backend.get_logger("app");
/// use eazy_logging::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($rest)+)
    };
}

/// Log a debug-level record.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($rest)+)
    };
}

/// Log an info-level record.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($rest)+)
    };
}

/// Log a warn-level record.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($rest)+)
    };
}

/// Log an error-level record.
///
/// # Examples
///
/// ```
/// # use eazy_logging::prelude::*;
/// # let backend = LoggingBackend::builder().appender(MemoryAppender::new()).build();
/// # let logger = backend.get_logger("app");
/// use eazy_logging::error;
/// let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
/// error!(logger, "Write of {} bytes failed", 512, LogArg::error(&io));
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($rest)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::appenders::MemoryAppender;
    use crate::core::{ErrorRecord, LoggerConfiguration, LoggingBackend, TimeZoneSpec};
    use std::sync::Arc;

    fn backend(level: &str) -> (LoggingBackend, Arc<MemoryAppender>) {
        let memory = Arc::new(MemoryAppender::new());
        let backend = LoggingBackend::builder()
            .configuration(LoggerConfiguration::new([("ROOT.LEVEL", level)]))
            .shared_appender(memory.clone())
            .time_zone(TimeZoneSpec::Utc)
            .build();
        (backend, memory)
    }

    #[test]
    fn test_macros_substitute_arguments() {
        let (backend, memory) = backend("TRACE");
        let logger = backend.get_logger("m");

        trace!(logger, "t={}", 1);
        debug!(logger, "d={}", "two");
        info!(logger, "i={} {}", 3, vec![4, 5]);
        warn!(logger, "w");
        error!(logger, "e={},", None::<i32>,);

        let records = memory.take();
        assert_eq!(records.len(), 5);
        assert!(records[0].ends_with(" t=1"));
        assert!(records[1].ends_with(" d=two"));
        assert!(records[2].ends_with(" i=3 [4, 5]"));
        assert!(records[3].ends_with(" w"));
        assert!(records[4].ends_with(" e=null,"));
    }

    #[test]
    fn test_disabled_levels_skip_argument_conversion() {
        let (backend, memory) = backend("ERROR");
        let logger = backend.get_logger("m");
        info!(logger, "hidden {}", 1);
        assert!(memory.is_empty());
    }

    #[test]
    fn test_trailing_error_argument() {
        let (backend, memory) = backend("INFO");
        let logger = backend.get_logger("m");
        error!(logger, "failed {}", "job", ErrorRecord::new("boom"));
        assert!(memory.records()[0].ends_with(" failed job\nboom"));
    }
}
