//! Hierarchical per-name configuration
//!
//! A flat, immutable string store keyed by properties such as
//! `com.example.LEVEL=WARN` or `com.example.STACKS=true`. Queries for a dotted
//! logger name walk from the most specific segment to the least specific one
//! and return the first usable entry, falling back to the `ROOT` entry and
//! finally to the built-in defaults.
//!
//! # Example
//!
//! ```
//! use eazy_logging::{LogLevel, LoggerConfiguration};
//!
//! let config = LoggerConfiguration::new([
//!     ("com.example.LEVEL", "WARN"),
//!     ("com.example.db.LEVEL", "TRACE"),
//! ]);
//!
//! assert_eq!(config.resolve_level("com.example.web.Handler"), LogLevel::Warn);
//! assert_eq!(config.resolve_level("com.example.db.Pool"), LogLevel::Trace);
//! assert_eq!(config.resolve_level("org.other"), LogLevel::Info);
//! ```

use super::diagnostics;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::properties;
use super::timestamp::TimeZoneSpec;
use std::collections::HashMap;
use std::path::Path;

/// Level used when no entry matches.
pub const DEFAULT_LEVEL: LogLevel = LogLevel::Info;
/// Hide-stacks flag used when no entry matches.
pub const DEFAULT_HIDE_STACKS: bool = false;
/// Name probed after every dotted segment has missed.
pub const ROOT_LOGGER_NAME: &str = "ROOT";
/// File read by [`LoggerConfiguration::from_default_file`].
pub const DEFAULT_PROPERTIES_FILE: &str = "logging.properties";

const SUFFIX_LEVEL: &str = ".LEVEL";
const SUFFIX_STACKS: &str = ".STACKS";

/// Immutable key/value store with segment-walk resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerConfiguration {
    properties: HashMap<String, String>,
}

impl LoggerConfiguration {
    /// Build a configuration from key/value pairs. Later duplicates win.
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            properties: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Build a configuration from pairs whose values may be absent.
    /// Absent values are dropped, never stored.
    pub fn from_optional_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .filter_map(|(k, v)| v.map(|v| (k, v))),
        )
    }

    /// An empty configuration: every query yields the defaults.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse properties-format text.
    pub fn from_properties_str(text: &str) -> Self {
        Self::new(properties::parse(text))
    }

    /// Load a properties file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading configuration",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Ok(Self::from_properties_str(&text))
    }

    /// Load `logging.properties` from the working directory.
    ///
    /// A missing or unreadable file is not an error: a notice is printed and
    /// the empty configuration is returned.
    pub fn from_default_file() -> Self {
        Self::load(DEFAULT_PROPERTIES_FILE).unwrap_or_else(|_| {
            diagnostics::info(format_args!(
                "File '{}' not found.",
                DEFAULT_PROPERTIES_FILE
            ));
            Self::empty()
        })
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Raw lookup of a single key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Resolve the effective level for a logger name.
    ///
    /// `name`, `name.` and `name.LEVEL` all resolve identically. A value that
    /// is not one of the canonical upper-case level names does not match;
    /// the walk continues with the next shorter segment.
    pub fn resolve_level(&self, name: &str) -> LogLevel {
        if self.properties.is_empty() {
            return DEFAULT_LEVEL;
        }

        let start = normalize(name, SUFFIX_LEVEL);
        walk_parent_names(start, |segment| {
            let key = format!("{}{}", segment, SUFFIX_LEVEL);
            let value = self.properties.get(&key)?;
            match value.parse::<LogLevel>() {
                Ok(level) => Some(level),
                Err(msg) => {
                    diagnostics::warning(format_args!("{} (key '{}')", msg, key));
                    None
                }
            }
        })
        .unwrap_or(DEFAULT_LEVEL)
    }

    /// Resolve whether stack traces are hidden for a logger name.
    ///
    /// `name`, `name.` and `name.STACKS` all resolve identically. Only a
    /// trailing `.STACKS` is stripped; `a.STACKS.b` is an ordinary name.
    pub fn resolve_hide_stacks(&self, name: &str) -> bool {
        if self.properties.is_empty() {
            return DEFAULT_HIDE_STACKS;
        }

        let start = normalize(name, SUFFIX_STACKS);
        walk_parent_names(start, |segment| {
            let key = format!("{}{}", segment, SUFFIX_STACKS);
            self.properties.get(&key).map(|v| parse_bool(v))
        })
        .unwrap_or(DEFAULT_HIDE_STACKS)
    }

    pub fn get_string<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Lenient boolean: only a case-insensitive `true` is true.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).map(parse_bool).unwrap_or(default)
    }

    /// Integer setting; unparseable values yield `default`.
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get(key)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(default)
    }

    /// Zone setting; `None` when the key is absent or names no known zone.
    pub fn get_time_zone(&self, key: &str) -> Option<TimeZoneSpec> {
        let id = self.get(key)?;
        let zone = TimeZoneSpec::parse(id);
        if zone.is_none() {
            diagnostics::warning(format_args!(
                "Unknown time zone [{}] for '{}', using the system zone",
                id, key
            ));
        }
        zone
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LoggerConfiguration {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter)
    }
}

fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// Strip every trailing `.`, then one trailing `suffix` if present.
fn normalize<'a>(name: &'a str, suffix: &str) -> &'a str {
    let trimmed = name.trim_end_matches('.');
    trimmed.strip_suffix(suffix).unwrap_or(trimmed)
}

/// Probe `start`, then each dot-truncated prefix of it, then the root name.
///
/// Returns the first `Some` produced by `probe`.
pub fn walk_parent_names<T>(start: &str, mut probe: impl FnMut(&str) -> Option<T>) -> Option<T> {
    let mut segment = start;
    while !segment.is_empty() {
        if let Some(found) = probe(segment) {
            return Some(found);
        }
        match segment.rfind('.') {
            Some(idx) => segment = &segment[..idx],
            None => break,
        }
    }
    probe(ROOT_LOGGER_NAME)
}
