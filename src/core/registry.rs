//! Name-to-logger registry
//!
//! Each distinct logger name is resolved against the configuration exactly
//! once, on first request, and the resulting [`LoggerIdentity`] is shared by
//! every later caller for the lifetime of the registry.

use super::configuration::LoggerConfiguration;
use super::log_level::LogLevel;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Resolved, shared state of one named logger.
///
/// The level is fixed at creation. The hide-stacks flag starts from the
/// configuration and may later be toggled by scoped muting.
#[derive(Debug)]
pub struct LoggerIdentity {
    name: String,
    condensed_name: String,
    level: LogLevel,
    hide_stacks: AtomicBool,
}

impl LoggerIdentity {
    pub fn new(name: impl Into<String>, level: LogLevel, hide_stacks: bool) -> Self {
        let name = name.into();
        Self {
            condensed_name: condense_name(&name),
            name,
            level,
            hide_stacks: AtomicBool::new(hide_stacks),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn condensed_name(&self) -> &str {
        &self.condensed_name
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.level.allows(level)
    }

    pub fn is_hide_stacks(&self) -> bool {
        self.hide_stacks.load(Ordering::Acquire)
    }

    /// Set the hide-stacks flag, returning the previous value.
    pub fn set_hide_stacks(&self, hide: bool) -> bool {
        self.hide_stacks.swap(hide, Ordering::AcqRel)
    }
}

/// Abbreviate every segment but the last to its first character.
///
/// The initials are concatenated and joined to the last segment with a
/// single dot: `ab.eazy.logging.LogTest` becomes `ael.LogTest`. Empty
/// segments contribute nothing; trailing dots are ignored.
pub fn condense_name(name: &str) -> String {
    let mut parts: Vec<&str> = name.split('.').collect();
    while parts.len() > 1 && parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }

    let Some((last, leading)) = parts.split_last() else {
        return String::new();
    };

    let mut dense: String = leading
        .iter()
        .filter_map(|part| part.trim().chars().next())
        .collect();
    if !dense.is_empty() {
        dense.push('.');
    }
    dense.push_str(last);
    dense
}

/// Concurrent get-or-create cache of [`LoggerIdentity`] values.
#[derive(Debug)]
pub struct LoggerRegistry {
    configuration: RwLock<Arc<LoggerConfiguration>>,
    loggers: RwLock<HashMap<String, Arc<LoggerIdentity>>>,
}

impl LoggerRegistry {
    pub fn new(configuration: Arc<LoggerConfiguration>) -> Self {
        Self {
            configuration: RwLock::new(configuration),
            loggers: RwLock::new(HashMap::new()),
        }
    }

    /// The configuration snapshot used for loggers created from now on.
    pub fn configuration(&self) -> Arc<LoggerConfiguration> {
        Arc::clone(&self.configuration.read())
    }

    /// Swap the configuration snapshot.
    ///
    /// Loggers that already exist keep the level and hide-stacks flag they
    /// were created with; only names requested for the first time afterwards
    /// see the new values.
    pub fn replace_configuration(&self, configuration: Arc<LoggerConfiguration>) {
        *self.configuration.write() = configuration;
    }

    /// Return the identity for `name`, creating it on first request.
    ///
    /// Concurrent first requests for the same name construct exactly one
    /// identity; every caller receives that same instance.
    pub fn get_or_create(&self, name: &str) -> Arc<LoggerIdentity> {
        if let Some(existing) = self.loggers.read().get(name) {
            return Arc::clone(existing);
        }

        let mut loggers = self.loggers.write();
        let identity = loggers
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(self.create(name)));
        Arc::clone(identity)
    }

    /// Lookup without creation.
    pub fn get(&self, name: &str) -> Option<Arc<LoggerIdentity>> {
        self.loggers.read().get(name).cloned()
    }

    /// Visit every registered logger below `parent_name`.
    ///
    /// A descendant's name starts with `parent_name + "."`; the parent itself
    /// is never visited. An empty parent name stands for the root, whose
    /// descendants are all other loggers. Visiting order is unspecified. The
    /// visitor runs without the registry lock held, so it may call back into
    /// the registry.
    pub fn for_each_descendant(&self, parent_name: &str, mut visitor: impl FnMut(&Arc<LoggerIdentity>)) {
        let prefix = if parent_name.is_empty() || parent_name.ends_with('.') {
            parent_name.to_string()
        } else {
            format!("{}.", parent_name)
        };

        let descendants: Vec<Arc<LoggerIdentity>> = self
            .loggers
            .read()
            .values()
            .filter(|logger| logger.name() != parent_name && logger.name().starts_with(&prefix))
            .cloned()
            .collect();

        for logger in &descendants {
            visitor(logger);
        }
    }

    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }

    /// Registered names, sorted.
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }

    fn create(&self, name: &str) -> LoggerIdentity {
        let configuration = self.configuration.read();
        let level = configuration.resolve_level(name);
        let hide_stacks = configuration.resolve_hide_stacks(name);
        LoggerIdentity::new(name, level, hide_stacks)
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new(Arc::new(LoggerConfiguration::empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(pairs: &[(&str, &str)]) -> LoggerRegistry {
        LoggerRegistry::new(Arc::new(pairs.iter().copied().collect()))
    }

    #[test]
    fn test_condense_name() {
        assert_eq!(condense_name("ab.eazy.logging.LogTest"), "ael.LogTest");
        assert_eq!(condense_name("com.example.Foo"), "ce.Foo");
        assert_eq!(condense_name("Foo"), "Foo");
        assert_eq!(condense_name(""), "");
        assert_eq!(condense_name("a..b"), "a.b");
        assert_eq!(condense_name("a.b."), "a.b");
    }

    #[test]
    fn test_get_or_create_returns_same_instance() {
        let registry = registry(&[]);
        let first = registry.get_or_create("a.b");
        let second = registry.get_or_create("a.b");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_levels_fixed_at_creation() {
        let registry = registry(&[("a.LEVEL", "WARN")]);
        let before = registry.get_or_create("a.b");
        assert_eq!(before.level(), LogLevel::Warn);

        registry.replace_configuration(Arc::new(LoggerConfiguration::new([("a.LEVEL", "DEBUG")])));

        assert_eq!(registry.get_or_create("a.b").level(), LogLevel::Warn);
        assert_eq!(registry.get_or_create("a.c").level(), LogLevel::Debug);
    }

    #[test]
    fn test_hide_stacks_toggle() {
        let registry = registry(&[("a.STACKS", "true")]);
        let logger = registry.get_or_create("a.b");
        assert!(logger.is_hide_stacks());
        assert!(logger.set_hide_stacks(false));
        assert!(!logger.is_hide_stacks());
    }

    #[test]
    fn test_for_each_descendant() {
        let registry = registry(&[]);
        for name in ["a", "a.b", "a.b.c", "ab", "a.x", "b.a"] {
            registry.get_or_create(name);
        }

        let mut seen = Vec::new();
        registry.for_each_descendant("a", |logger| seen.push(logger.name().to_string()));
        seen.sort();
        assert_eq!(seen, vec!["a.b", "a.b.c", "a.x"]);

        let mut seen = Vec::new();
        registry.for_each_descendant("a.b.c", |logger| seen.push(logger.name().to_string()));
        assert!(seen.is_empty());

        let mut count = 0;
        registry.for_each_descendant("", |_| count += 1);
        assert_eq!(count, 6);
    }

    #[test]
    fn test_visitor_may_reenter_registry() {
        let registry = registry(&[]);
        registry.get_or_create("a.b");
        registry.for_each_descendant("a", |_| {
            registry.get_or_create("a.new");
        });
        assert!(registry.get("a.new").is_some());
    }

    #[test]
    fn test_logger_names_sorted() {
        let registry = registry(&[]);
        registry.get_or_create("z");
        registry.get_or_create("a");
        assert_eq!(registry.logger_names(), vec!["a", "z"]);
    }
}
