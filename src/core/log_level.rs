//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log event, ordered from least to most severe.
///
/// An event is enabled for a logger when its level is greater than or equal
/// to the logger's resolved level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    /// All levels in ascending severity.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// The fixed five-character level column of a rendered record.
    pub fn padded(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO ",
            LogLevel::Warn => "WARN ",
            LogLevel::Error => "ERROR",
        }
    }

    /// Whether an event at `event` passes a threshold of `self`.
    #[inline]
    pub fn allows(&self, event: LogLevel) -> bool {
        event >= *self
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Parses only the canonical upper-case names. Configuration values are
/// case-sensitive, so `"debug"` is rejected.
impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(format!(
                "Unknown level [{}], expecting only [TRACE, DEBUG, INFO, WARN, ERROR] as values",
                s
            )),
        }
    }
}

#[cfg(feature = "facade")]
impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => LogLevel::Trace,
            log::Level::Debug => LogLevel::Debug,
            log::Level::Info => LogLevel::Info,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Error => LogLevel::Error,
        }
    }
}

#[cfg(feature = "facade")]
impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_is_five_wide() {
        for level in LogLevel::ALL {
            assert_eq!(level.padded().len(), 5);
            assert_eq!(level.padded().trim_end(), level.to_str());
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("warn".parse::<LogLevel>().is_err());
        assert!("Warn".parse::<LogLevel>().is_err());
        assert!("WARNING".parse::<LogLevel>().is_err());
        assert!("".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_default_and_ordering() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Warn < LogLevel::Error);

        assert!(LogLevel::Info.allows(LogLevel::Info));
        assert!(LogLevel::Info.allows(LogLevel::Error));
        assert!(!LogLevel::Info.allows(LogLevel::Debug));
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "\"WARN\"");
        let parsed: LogLevel = serde_json::from_str("\"TRACE\"").unwrap();
        assert_eq!(parsed, LogLevel::Trace);
        assert!(serde_json::from_str::<LogLevel>("\"trace\"").is_err());
    }

    #[cfg(feature = "facade")]
    #[test]
    fn test_facade_level_mapping() {
        assert_eq!(LogLevel::from(log::Level::Warn), LogLevel::Warn);
        assert_eq!(log::LevelFilter::from(LogLevel::Debug), log::LevelFilter::Debug);
    }
}
