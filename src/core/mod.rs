//! Core logging types: configuration, registry, formatting and loggers

pub mod appender;
pub mod backend;
pub mod configuration;
pub(crate) mod diagnostics;
pub mod error;
pub mod error_chain;
pub mod formatter;
pub mod log_arg;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod message;
pub mod properties;
pub mod registry;
pub mod stackless;
pub mod timestamp;

pub use appender::Appender;
pub use backend::{LoggingBackend, LoggingBackendBuilder};
pub use configuration::{
    LoggerConfiguration, DEFAULT_HIDE_STACKS, DEFAULT_LEVEL, DEFAULT_PROPERTIES_FILE,
    ROOT_LOGGER_NAME,
};
pub use error::{LoggerError, Result};
pub use error_chain::{ErrorChain, ErrorRecord};
pub use formatter::{FormatterConfig, RecordFormatter};
pub use log_arg::LogArg;
pub use log_entry::LogEvent;
pub use log_level::LogLevel;
pub use logger::Logger;
pub use message::{format_message, FormattedMessage};
pub use registry::{condense_name, LoggerIdentity, LoggerRegistry};
pub use stackless::StacklessGuard;
pub use timestamp::{TimeZoneSpec, TimestampCache};
