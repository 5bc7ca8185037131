//! Scoped stack-trace muting

use super::log_level::LogLevel;
use super::registry::{LoggerIdentity, LoggerRegistry};
use std::sync::Arc;

/// Hides error chains for a set of loggers until dropped.
///
/// On construction every named logger, and every registered descendant of
/// it, that is not debug-enabled and does not already hide stacks switches
/// to inline error rendering. Dropping the guard switches exactly those
/// loggers back. Loggers at DEBUG or finer keep their full chains, since
/// whoever enabled them wants the detail.
///
/// # Example
///
/// ```
/// use eazy_logging::{LoggerConfiguration, LoggingBackend};
///
/// let backend = LoggingBackend::new(LoggerConfiguration::empty());
/// let noisy = backend.get_logger("app.noisy.Driver");
/// {
///     let _quiet = backend.stackless(&["app.noisy"]);
///     assert!(noisy.identity().is_hide_stacks());
/// }
/// assert!(!noisy.identity().is_hide_stacks());
/// ```
#[must_use = "stack traces are restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct StacklessGuard {
    squelched: Vec<Arc<LoggerIdentity>>,
}

impl StacklessGuard {
    pub fn new<S: AsRef<str>>(registry: &LoggerRegistry, names: &[S]) -> Self {
        let mut guard = Self {
            squelched: Vec::new(),
        };
        for name in names {
            let name = name.as_ref();
            guard.squelch(registry.get_or_create(name));
            registry.for_each_descendant(name, |child| guard.squelch(Arc::clone(child)));
        }
        guard
    }

    /// Loggers currently muted by this guard.
    pub fn squelched(&self) -> &[Arc<LoggerIdentity>] {
        &self.squelched
    }

    fn squelch(&mut self, logger: Arc<LoggerIdentity>) {
        if logger.is_enabled(LogLevel::Debug) || logger.is_hide_stacks() {
            return;
        }
        logger.set_hide_stacks(true);
        self.squelched.push(logger);
    }
}

impl Drop for StacklessGuard {
    fn drop(&mut self) {
        for logger in self.squelched.drain(..) {
            logger.set_hide_stacks(false);
        }
    }
}
