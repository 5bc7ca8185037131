//! Log event structure

use super::error_chain::ErrorChain;
use super::log_arg::LogArg;
use super::log_level::LogLevel;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

// Thread-local cache for the thread label to avoid repeated allocations
thread_local! {
    static THREAD_LABEL_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// The current thread's name, or its id when unnamed, cached per thread.
pub fn current_thread_label() -> String {
    THREAD_LABEL_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                let thread = std::thread::current();
                match thread.name() {
                    Some(name) => name.to_string(),
                    None => format!("{:?}", thread.id()),
                }
            })
            .clone()
    })
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_millis() as i64,
        Err(before) => -(before.duration().as_millis() as i64),
    }
}

/// A single log request, consumed by the formatter and then discarded.
#[derive(Clone)]
pub struct LogEvent {
    pub level: LogLevel,
    pub timestamp_millis: i64,
    pub thread_label: Option<String>,
    pub error: Option<Arc<dyn ErrorChain>>,
    pub template: String,
    pub args: Vec<LogArg>,
}

impl LogEvent {
    /// An event stamped with the current time and thread.
    pub fn new(level: LogLevel, template: impl Into<String>) -> Self {
        Self {
            level,
            timestamp_millis: now_millis(),
            thread_label: Some(current_thread_label()),
            error: None,
            template: template.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, epoch_millis: i64) -> Self {
        self.timestamp_millis = epoch_millis;
        self
    }

    #[must_use]
    pub fn with_thread(mut self, label: impl Into<String>) -> Self {
        self.thread_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn without_thread(mut self) -> Self {
        self.thread_label = None;
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: Arc<dyn ErrorChain>) -> Self {
        self.error = Some(error);
        self
    }

    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<LogArg>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = LogArg>) -> Self {
        self.args.extend(args);
        self
    }
}

impl fmt::Debug for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEvent")
            .field("level", &self.level)
            .field("timestamp_millis", &self.timestamp_millis)
            .field("thread_label", &self.thread_label)
            .field("error", &self.error.as_ref().map(|e| e.description()))
            .field("template", &self.template)
            .field("args", &self.args)
            .finish()
    }
}
