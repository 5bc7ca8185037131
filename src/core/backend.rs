//! Backend wiring: registry, formatter and appender in one owned object

use super::{
    appender::Appender,
    configuration::LoggerConfiguration,
    diagnostics,
    error::Result,
    formatter::{FormatterConfig, RecordFormatter},
    logger::Logger,
    registry::LoggerRegistry,
    stackless::StacklessGuard,
    timestamp::TimeZoneSpec,
};
use crate::appenders::ConsoleAppender;
use std::fmt;
use std::sync::Arc;

/// Owns everything a process needs to hand out [`Logger`]s.
///
/// Loggers are resolved once per name against the configuration the backend
/// was built with, and share one formatter and one appender.
///
/// # Example
///
/// ```
/// use eazy_logging::{LoggerConfiguration, LoggingBackend, LogLevel};
///
/// let config = LoggerConfiguration::new([("com.example.LEVEL", "DEBUG")]);
/// let backend = LoggingBackend::new(config);
///
/// let logger = backend.get_logger("com.example.Foo");
/// assert_eq!(logger.level(), LogLevel::Debug);
/// assert_eq!(backend.get_logger("other").level(), LogLevel::Info);
/// ```
pub struct LoggingBackend {
    registry: LoggerRegistry,
    formatter: Arc<RecordFormatter>,
    appender: Arc<dyn Appender>,
}

impl LoggingBackend {
    /// A backend writing to stderr, with rendering options read from
    /// `config`.
    pub fn new(config: LoggerConfiguration) -> Self {
        Self::builder().configuration(config).build()
    }

    /// A backend configured from `logging.properties` in the working
    /// directory, or with defaults when that file is absent.
    pub fn from_default_file() -> Self {
        Self::new(LoggerConfiguration::from_default_file())
    }

    #[must_use]
    pub fn builder() -> LoggingBackendBuilder {
        LoggingBackendBuilder::new()
    }

    /// The logger for `name`, resolved on first request.
    pub fn get_logger(&self, name: &str) -> Logger {
        Logger::new(
            self.registry.get_or_create(name),
            Arc::clone(&self.formatter),
            Arc::clone(&self.appender),
        )
    }

    pub fn registry(&self) -> &LoggerRegistry {
        &self.registry
    }

    pub fn configuration(&self) -> Arc<LoggerConfiguration> {
        self.registry.configuration()
    }

    pub fn formatter(&self) -> &Arc<RecordFormatter> {
        &self.formatter
    }

    pub fn appender(&self) -> &Arc<dyn Appender> {
        &self.appender
    }

    pub fn flush(&self) -> Result<()> {
        self.appender.flush()
    }

    /// Hide error chains for `names` and their descendants until the
    /// returned guard is dropped.
    pub fn stackless<S: AsRef<str>>(&self, names: &[S]) -> StacklessGuard {
        StacklessGuard::new(&self.registry, names)
    }
}

impl Default for LoggingBackend {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for LoggingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingBackend")
            .field("loggers", &self.registry.len())
            .field("formatter", self.formatter.config())
            .field("appender", &self.appender.name())
            .finish()
    }
}

impl Drop for LoggingBackend {
    fn drop(&mut self) {
        if let Err(e) = self.appender.flush() {
            diagnostics::error(format_args!(
                "Appender {} flush failed on shutdown: {}",
                self.appender.name(),
                e
            ));
        }
    }
}

/// Builder for [`LoggingBackend`].
///
/// Rendering options come from the configuration's tuning keys unless set
/// explicitly with [`formatter_config`](Self::formatter_config); an explicit
/// [`time_zone`](Self::time_zone) overrides either source.
#[derive(Default)]
pub struct LoggingBackendBuilder {
    configuration: Option<LoggerConfiguration>,
    appender: Option<Arc<dyn Appender>>,
    formatter_config: Option<FormatterConfig>,
    time_zone: Option<TimeZoneSpec>,
}

impl LoggingBackendBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn configuration(mut self, configuration: LoggerConfiguration) -> Self {
        self.configuration = Some(configuration);
        self
    }

    /// Set the record sink. Defaults to a stderr [`ConsoleAppender`].
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(self, appender: A) -> Self {
        self.shared_appender(Arc::new(appender))
    }

    /// Set a sink the caller keeps a handle to.
    #[must_use = "builder methods return a new value"]
    pub fn shared_appender(mut self, appender: Arc<dyn Appender>) -> Self {
        self.appender = Some(appender);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter_config(mut self, config: FormatterConfig) -> Self {
        self.formatter_config = Some(config);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_zone(mut self, zone: TimeZoneSpec) -> Self {
        self.time_zone = Some(zone);
        self
    }

    pub fn build(self) -> LoggingBackend {
        let configuration = self.configuration.unwrap_or_default();

        let mut formatter_config = self
            .formatter_config
            .unwrap_or_else(|| FormatterConfig::from_configuration(&configuration));
        if let Some(zone) = self.time_zone {
            formatter_config.zone = zone;
        }

        let appender = self
            .appender
            .unwrap_or_else(|| Arc::new(ConsoleAppender::new()));

        LoggingBackend {
            registry: LoggerRegistry::new(Arc::new(configuration)),
            formatter: Arc::new(RecordFormatter::new(formatter_config)),
            appender,
        }
    }
}

impl fmt::Debug for LoggingBackendBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingBackendBuilder")
            .field("configuration", &self.configuration)
            .field("appender", &self.appender.as_ref().map(|a| a.name().to_string()))
            .field("formatter_config", &self.formatter_config)
            .field("time_zone", &self.time_zone)
            .finish()
    }
}
