//! Operational notices about the backend itself.
//!
//! The backend cannot route its own problems through the records it renders,
//! so notices go straight to the process stderr with a bracketed prefix.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Notice {
    Info,
    Warning,
    Error,
}

impl Notice {
    fn prefix(self) -> &'static str {
        match self {
            Notice::Info => "[LOGGER INFO]",
            Notice::Warning => "[LOGGER WARNING]",
            Notice::Error => "[LOGGER ERROR]",
        }
    }
}

pub(crate) fn notice(kind: Notice, args: fmt::Arguments<'_>) {
    eprintln!("{} {}", kind.prefix(), args);
}

pub(crate) fn info(args: fmt::Arguments<'_>) {
    notice(Notice::Info, args);
}

pub(crate) fn warning(args: fmt::Arguments<'_>) {
    notice(Notice::Warning, args);
}

pub(crate) fn error(args: fmt::Arguments<'_>) {
    notice(Notice::Error, args);
}
