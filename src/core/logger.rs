//! Per-name logger handle

use super::{
    appender::Appender,
    diagnostics,
    error_chain::ErrorChain,
    formatter::RecordFormatter,
    log_arg::LogArg,
    log_entry::LogEvent,
    log_level::LogLevel,
    registry::LoggerIdentity,
};
use std::fmt;
use std::sync::Arc;

/// A named logger bound to a backend's formatter and appender.
///
/// Cloning is cheap; all clones share the same [`LoggerIdentity`], so a
/// hide-stacks change made through one is seen by the others.
#[derive(Clone)]
pub struct Logger {
    identity: Arc<LoggerIdentity>,
    formatter: Arc<RecordFormatter>,
    appender: Arc<dyn Appender>,
}

impl Logger {
    pub fn new(
        identity: Arc<LoggerIdentity>,
        formatter: Arc<RecordFormatter>,
        appender: Arc<dyn Appender>,
    ) -> Self {
        Self {
            identity,
            formatter,
            appender,
        }
    }

    pub fn name(&self) -> &str {
        self.identity.name()
    }

    pub fn identity(&self) -> &Arc<LoggerIdentity> {
        &self.identity
    }

    pub fn level(&self) -> LogLevel {
        self.identity.level()
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.identity.is_enabled(level)
    }

    #[inline]
    pub fn is_trace_enabled(&self) -> bool {
        self.is_enabled(LogLevel::Trace)
    }

    #[inline]
    pub fn is_debug_enabled(&self) -> bool {
        self.is_enabled(LogLevel::Debug)
    }

    #[inline]
    pub fn is_info_enabled(&self) -> bool {
        self.is_enabled(LogLevel::Info)
    }

    #[inline]
    pub fn is_warn_enabled(&self) -> bool {
        self.is_enabled(LogLevel::Warn)
    }

    #[inline]
    pub fn is_error_enabled(&self) -> bool {
        self.is_enabled(LogLevel::Error)
    }

    /// Render and write one record if `level` is enabled.
    ///
    /// A trailing [`LogArg::Error`] is rendered as the record's error chain.
    pub fn log(&self, level: LogLevel, template: &str, args: &[LogArg]) {
        if !self.is_enabled(level) {
            return;
        }
        self.emit(LogEvent::new(level, template).with_args(args.iter().cloned()));
    }

    /// Like [`Logger::log`] with an explicit error, which takes precedence
    /// over any trailing error argument.
    pub fn log_error(
        &self,
        level: LogLevel,
        error: Arc<dyn ErrorChain>,
        template: &str,
        args: &[LogArg],
    ) {
        if !self.is_enabled(level) {
            return;
        }
        self.emit(
            LogEvent::new(level, template)
                .with_error(error)
                .with_args(args.iter().cloned()),
        );
    }

    /// Write a prepared event, bypassing the level check.
    ///
    /// Sink failures and panics are reported on stderr and never reach the
    /// caller.
    pub fn emit(&self, event: LogEvent) {
        let record = self.formatter.render(&self.identity, &event);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.appender.append(&record)
        }));

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => diagnostics::error(format_args!(
                "Appender {} failed for logger {}: {}",
                self.appender.name(),
                self.identity.name(),
                e
            )),
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                diagnostics::error(format_args!(
                    "Appender {} panicked for logger {}: {}",
                    self.appender.name(),
                    self.identity.name(),
                    panic_msg
                ));
            }
        }
    }

    #[inline]
    pub fn trace(&self, template: &str, args: &[LogArg]) {
        self.log(LogLevel::Trace, template, args);
    }

    #[inline]
    pub fn debug(&self, template: &str, args: &[LogArg]) {
        self.log(LogLevel::Debug, template, args);
    }

    #[inline]
    pub fn info(&self, template: &str, args: &[LogArg]) {
        self.log(LogLevel::Info, template, args);
    }

    #[inline]
    pub fn warn(&self, template: &str, args: &[LogArg]) {
        self.log(LogLevel::Warn, template, args);
    }

    #[inline]
    pub fn error(&self, template: &str, args: &[LogArg]) {
        self.log(LogLevel::Error, template, args);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.identity.name())
            .field("level", &self.identity.level())
            .field("hide_stacks", &self.identity.is_hide_stacks())
            .field("appender", &self.appender.name())
            .finish()
    }
}
