//! # Eazy Logging
//!
//! A logging backend with hierarchical, per-name configuration and
//! deterministic single-line records.
//!
//! ## Features
//!
//! - **Hierarchical configuration**: `com.example.LEVEL=DEBUG` applies to
//!   every logger under `com.example` unless a longer name overrides it
//! - **Resolve once**: each logger name is resolved on first use and cached
//! - **Stable records**: `timestamp:LEVEL:name:thread: message`, control
//!   characters escaped, error chains indented and cycle-safe
//! - **`log` facade**: install a backend behind `log::info!` and friends
//!
//! ## Example
//!
//! ```
//! use eazy_logging::prelude::*;
//! use std::sync::Arc;
//!
//! let config = LoggerConfiguration::from_properties_str(
//!     "ROOT.LEVEL=WARN\n\
//!      com.example.LEVEL=DEBUG\n",
//! );
//! let memory = Arc::new(MemoryAppender::new());
//! let backend = LoggingBackend::builder()
//!     .configuration(config)
//!     .shared_appender(memory.clone())
//!     .build();
//!
//! let logger = backend.get_logger("com.example.Foo");
//! logger.debug("cache {} of {}", &[3.into(), 10.into()]);
//! let record = memory.records().remove(0);
//! assert!(record.contains(":DEBUG:ce.Foo:"));
//! assert!(record.ends_with(" cache 3 of 10"));
//!
//! assert!(!backend.get_logger("org.other.Bar").is_info_enabled());
//! ```

pub mod appenders;
pub mod core;
#[cfg(feature = "facade")]
pub mod facade;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, MemoryAppender, StreamAppender};
    pub use crate::core::{
        Appender, ErrorChain, ErrorRecord, FormatterConfig, LogArg, LogEvent, LogLevel, Logger,
        LoggerConfiguration, LoggerError, LoggingBackend, LoggingBackendBuilder, Result,
        StacklessGuard, TimeZoneSpec,
    };
}

pub use appenders::{ConsoleAppender, ConsoleTarget, MemoryAppender, StreamAppender};
pub use core::{
    condense_name, format_message, Appender, ErrorChain, ErrorRecord, FormattedMessage,
    FormatterConfig, LogArg, LogEvent, LogLevel, Logger, LoggerConfiguration, LoggerError,
    LoggerIdentity, LoggerRegistry, LoggingBackend, LoggingBackendBuilder, RecordFormatter,
    Result, StacklessGuard, TimeZoneSpec, TimestampCache, DEFAULT_HIDE_STACKS, DEFAULT_LEVEL,
    DEFAULT_PROPERTIES_FILE, ROOT_LOGGER_NAME,
};
