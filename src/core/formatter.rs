//! Single-line record rendering
//!
//! A record is laid out as colon-separated fields:
//!
//! ```text
//! 2020-02-17 19:11:35.563:INFO :ael.LogTest:tname: testing:test log,format
//! ^timestamp              ^level^logger     ^thread ^message
//! ```
//!
//! Control characters in the message and in error text are escaped so that
//! a record never spans lines, except for the explicitly indented error
//! chain that follows it.

use super::configuration::LoggerConfiguration;
use super::error_chain::{identity, ErrorChain};
use super::log_entry::LogEvent;
use super::message::format_message;
use super::registry::LoggerIdentity;
use super::timestamp::{TimeZoneSpec, TimestampCache};
use std::collections::HashMap;
use std::sync::Arc;

/// Use condensed logger names (bool, default `true`)
pub const NAME_CONDENSE_KEY: &str = "ab.eazy.logging.appender.NAME_CONDENSE";
/// Column the message is aligned to (int, default `0` = no alignment)
pub const MESSAGE_ALIGN_KEY: &str = "ab.eazy.logging.appender.MESSAGE_ALIGN";
/// Escape control characters (bool, default `true`)
pub const MESSAGE_ESCAPE_KEY: &str = "ab.eazy.logging.appender.MESSAGE_ESCAPE";
/// Zone used for timestamps (zone id, default: system zone)
pub const ZONE_ID_KEY: &str = "ab.eazy.logging.appender.ZONE_ID";

const EOL: &str = "\n";

/// Rendering options.
///
/// # Examples
///
/// ```
/// use eazy_logging::{FormatterConfig, TimeZoneSpec};
///
/// let config = FormatterConfig::new()
///     .with_zone(TimeZoneSpec::Utc)
///     .with_message_align_column(42);
/// assert!(config.condensed_names);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterConfig {
    pub condensed_names: bool,
    pub escaped_messages: bool,
    pub message_align_column: usize,
    pub zone: TimeZoneSpec,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            condensed_names: true,
            escaped_messages: true,
            message_align_column: 0,
            zone: TimeZoneSpec::Local,
        }
    }
}

impl FormatterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the engine-tuning keys. Unparseable values fall back to defaults.
    pub fn from_configuration(config: &LoggerConfiguration) -> Self {
        let defaults = Self::default();
        Self {
            condensed_names: config.get_bool(NAME_CONDENSE_KEY, defaults.condensed_names),
            escaped_messages: config.get_bool(MESSAGE_ESCAPE_KEY, defaults.escaped_messages),
            message_align_column: usize::try_from(config.get_int(MESSAGE_ALIGN_KEY, 0))
                .unwrap_or(defaults.message_align_column),
            zone: config.get_time_zone(ZONE_ID_KEY).unwrap_or(defaults.zone),
        }
    }

    #[must_use]
    pub fn with_condensed_names(mut self, condensed: bool) -> Self {
        self.condensed_names = condensed;
        self
    }

    #[must_use]
    pub fn with_escaped_messages(mut self, escaped: bool) -> Self {
        self.escaped_messages = escaped;
        self
    }

    #[must_use]
    pub fn with_message_align_column(mut self, column: usize) -> Self {
        self.message_align_column = column;
        self
    }

    #[must_use]
    pub fn with_zone(mut self, zone: TimeZoneSpec) -> Self {
        self.zone = zone;
        self
    }
}

/// Renders events into record text.
///
/// The only state is the whole-second timestamp cache, so one formatter may
/// be shared by any number of threads.
#[derive(Debug, Default)]
pub struct RecordFormatter {
    config: FormatterConfig,
    timestamps: TimestampCache,
}

impl RecordFormatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self {
            timestamps: TimestampCache::new(config.zone),
            config,
        }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    pub fn is_condensed_names(&self) -> bool {
        self.config.condensed_names
    }

    pub fn is_escaped_messages(&self) -> bool {
        self.config.escaped_messages
    }

    pub fn message_align_column(&self) -> usize {
        self.config.message_align_column
    }

    /// Render `event` as logged by `logger`, without a trailing newline.
    pub fn render(&self, logger: &LoggerIdentity, event: &LogEvent) -> String {
        let mut out = String::with_capacity(64 + event.template.len());
        self.render_into(&mut out, logger, event);
        out
    }

    pub fn render_into(&self, out: &mut String, logger: &LoggerIdentity, event: &LogEvent) {
        let line_start = out.len();

        self.timestamps.format_into(event.timestamp_millis, out);

        out.push(':');
        out.push_str(event.level.padded());

        out.push(':');
        if self.config.condensed_names {
            out.push_str(logger.condensed_name());
        } else {
            out.push_str(logger.name());
        }

        out.push(':');
        if let Some(thread) = &event.thread_label {
            out.push_str(thread);
        }
        out.push(':');

        let width = out[line_start..].chars().count();
        match self.config.message_align_column.checked_sub(width) {
            Some(pad) if pad > 0 => out.extend(std::iter::repeat(' ').take(pad)),
            _ => out.push(' '),
        }

        let formatted = format_message(&event.template, &event.args);
        self.append_escaped(out, &formatted.message);

        let Some(cause) = event.error.clone().or(formatted.error) else {
            return;
        };

        if logger.is_hide_stacks() {
            out.push_str(": ");
            self.append_escaped(out, &cause.description());
        } else {
            let mut visited = HashMap::new();
            self.append_cause(out, cause, "", &mut visited);
        }
    }

    /// Depth-first rendering of an error, its suppressed errors and its cause.
    ///
    /// `visited` maps node identities to the nodes themselves; a node seen
    /// before renders as a circular-reference marker and is not expanded
    /// again. Holding the nodes keeps their addresses from being reused while
    /// the walk runs. Causes are followed iteratively since they share the
    /// same indent.
    fn append_cause(
        &self,
        out: &mut String,
        mut cause: Arc<dyn ErrorChain>,
        indent: &str,
        visited: &mut HashMap<usize, Arc<dyn ErrorChain>>,
    ) {
        loop {
            out.push_str(EOL);
            out.push_str(indent);

            let id = identity(&cause);
            if visited.contains_key(&id) {
                out.push_str("[CIRCULAR REFERENCE: ");
                self.append_escaped(out, &cause.description());
                out.push(']');
                return;
            }
            visited.insert(id, Arc::clone(&cause));

            self.append_escaped(out, &cause.description());
            for frame in cause.frames() {
                out.push_str(EOL);
                out.push_str(indent);
                out.push_str("\tat ");
                self.append_escaped(out, &frame);
            }

            let suppressed = cause.suppressed();
            if !suppressed.is_empty() {
                let nested = format!("\t|{}", indent);
                for inner in suppressed {
                    out.push_str(EOL);
                    out.push_str(indent);
                    out.push_str("Suppressed: ");
                    self.append_cause(out, inner, &nested, visited);
                }
            }

            match cause.cause() {
                Some(by) => {
                    out.push_str(EOL);
                    out.push_str(indent);
                    out.push_str("Caused by: ");
                    cause = by;
                }
                None => return,
            }
        }
    }

    fn append_escaped(&self, out: &mut String, text: &str) {
        if !self.config.escaped_messages {
            out.push_str(text);
            return;
        }
        out.extend(text.chars().map(escape_char));
    }
}

/// `\n` → `|`, `\r` → `<`, any other control character → `?`.
fn escape_char(c: char) -> char {
    match c {
        '\n' => '|',
        '\r' => '<',
        c if c.is_control() => '?',
        c => c,
    }
}
