//! Error chains attached to log records
//!
//! [`ErrorChain`] is the capability the formatter needs from an error: a
//! one-line description, the frames it originated from, any suppressed
//! secondary errors, and an underlying cause. Links are shared handles, so a
//! chain may be a graph with cycles; the formatter guards against that by
//! identity.
//!
//! [`ErrorRecord`] is the provided implementation. Its links can be attached
//! after construction, and [`ErrorRecord::from_error`] snapshots any
//! `std::error::Error` together with its `source()` chain.

use parking_lot::RwLock;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::sync::Arc;

/// Longest `source()` chain [`ErrorRecord::from_error`] will follow.
pub const MAX_SOURCE_DEPTH: usize = 64;

/// An error as seen by the record formatter.
pub trait ErrorChain: Send + Sync {
    /// One-line description, e.g. `IoError: connection reset`.
    fn description(&self) -> String;

    /// Originating frames, innermost first.
    fn frames(&self) -> Vec<String> {
        Vec::new()
    }

    /// Secondary errors recorded alongside this one.
    fn suppressed(&self) -> Vec<Arc<dyn ErrorChain>> {
        Vec::new()
    }

    /// The error this one was caused by.
    fn cause(&self) -> Option<Arc<dyn ErrorChain>> {
        None
    }
}

/// Identity of a shared error node, independent of its contents.
pub fn identity(error: &Arc<dyn ErrorChain>) -> usize {
    Arc::as_ptr(error) as *const () as usize
}

/// A concrete, linkable error node.
///
/// Links are held as strong references, so a cyclic chain is never freed;
/// cycles are meant for genuinely self-referential errors, not routine use.
pub struct ErrorRecord {
    description: String,
    frames: Vec<String>,
    cause: RwLock<Option<Arc<dyn ErrorChain>>>,
    suppressed: RwLock<Vec<Arc<dyn ErrorChain>>>,
}

impl ErrorRecord {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            frames: Vec::new(),
            cause: RwLock::new(None),
            suppressed: RwLock::new(Vec::new()),
        }
    }

    /// `kind: message`, or just `kind` when there is no message.
    pub fn typed(kind: &str, message: Option<&str>) -> Self {
        match message {
            Some(message) => Self::new(format!("{}: {}", kind, message)),
            None => Self::new(kind),
        }
    }

    /// Snapshot `error` and its `source()` chain into linked records.
    ///
    /// A wrapper and its source can share an address, so sources are told
    /// apart by the full trait-object pointer. Vtables are not guaranteed
    /// unique either, hence the depth bound.
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Arc<ErrorRecord> {
        let mut seen: Vec<*const dyn std::error::Error> = Vec::new();
        let mut chain: Vec<String> = Vec::new();
        let mut current: Option<&(dyn std::error::Error + 'static)> = Some(error);
        while let Some(err) = current {
            let ptr = err as *const dyn std::error::Error;
            if chain.len() >= MAX_SOURCE_DEPTH || seen.iter().any(|s| std::ptr::eq(*s, ptr)) {
                break;
            }
            seen.push(ptr);
            chain.push(err.to_string());
            current = err.source();
        }

        let mut cause: Option<Arc<dyn ErrorChain>> = None;
        let mut head = None;
        for description in chain.into_iter().rev() {
            let record = Arc::new(ErrorRecord::new(description));
            if let Some(inner) = cause.take() {
                record.set_cause(inner);
            }
            cause = Some(record.clone() as Arc<dyn ErrorChain>);
            head = Some(record);
        }
        head.unwrap_or_else(|| Arc::new(ErrorRecord::new(error.to_string())))
    }

    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.frames.push(frame.into());
        self
    }

    #[must_use]
    pub fn with_frames<I, S>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.frames.extend(frames.into_iter().map(Into::into));
        self
    }

    /// Take frames from a captured backtrace. Disabled or unsupported
    /// backtraces contribute nothing.
    #[must_use]
    pub fn with_backtrace(self, backtrace: &Backtrace) -> Self {
        if backtrace.status() != BacktraceStatus::Captured {
            return self;
        }
        let rendered = backtrace.to_string();
        let frames: Vec<String> = rendered
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        self.with_frames(frames)
    }

    #[must_use]
    pub fn with_cause(self, cause: Arc<dyn ErrorChain>) -> Self {
        self.set_cause(cause);
        self
    }

    /// Attach or replace the cause.
    pub fn set_cause(&self, cause: Arc<dyn ErrorChain>) {
        *self.cause.write() = Some(cause);
    }

    pub fn add_suppressed(&self, suppressed: Arc<dyn ErrorChain>) {
        self.suppressed.write().push(suppressed);
    }

    pub fn into_shared(self) -> Arc<ErrorRecord> {
        Arc::new(self)
    }
}

impl ErrorChain for ErrorRecord {
    fn description(&self) -> String {
        self.description.clone()
    }

    fn frames(&self) -> Vec<String> {
        self.frames.clone()
    }

    fn suppressed(&self) -> Vec<Arc<dyn ErrorChain>> {
        self.suppressed.read().clone()
    }

    fn cause(&self) -> Option<Arc<dyn ErrorChain>> {
        self.cause.read().clone()
    }
}

// Links are not followed: a cyclic chain would never finish printing.
impl fmt::Debug for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorRecord")
            .field("description", &self.description)
            .field("frames", &self.frames.len())
            .field("suppressed", &self.suppressed.read().len())
            .field("has_cause", &self.cause.read().is_some())
            .finish()
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}
