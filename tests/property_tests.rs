//! Property-based tests for eazy_logging using proptest

use eazy_logging::prelude::*;
use eazy_logging::{condense_name, format_message, LoggerIdentity, RecordFormatter};
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
    ]
}

/// Dotted names built from short lower-case segments.
fn dotted_name() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z][a-z0-9]{0,5}", 1..5).prop_map(|parts| parts.join("."))
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Canonical names parse back to the same level
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Any case other than the canonical one is rejected
    #[test]
    fn test_log_level_parse_is_case_sensitive(level in any_level()) {
        let lower = level.to_str().to_lowercase();
        prop_assert!(lower.parse::<LogLevel>().is_err());
    }

    /// Enablement follows the natural ordering
    #[test]
    fn test_enablement_matches_ordering(configured in any_level(), event in any_level()) {
        let identity = LoggerIdentity::new("p", configured, false);
        prop_assert_eq!(identity.is_enabled(event), event >= configured);
    }
}

// ============================================================================
// Resolution Tests
// ============================================================================

proptest! {
    /// `name`, `name.` and `name.LEVEL` resolve identically
    #[test]
    fn test_name_variants_resolve_alike(
        configured in dotted_name(),
        child in "[A-Z][a-z]{0,6}",
        level in any_level(),
    ) {
        let config = LoggerConfiguration::new([(format!("{}.LEVEL", configured), level.to_str())]);
        let name = format!("{}.{}", configured, child);

        let plain = config.resolve_level(&name);
        prop_assert_eq!(plain, level);
        prop_assert_eq!(config.resolve_level(&format!("{}.", name)), plain);
        prop_assert_eq!(config.resolve_level(&format!("{}.LEVEL", name)), plain);
    }

    /// The longest configured prefix wins
    #[test]
    fn test_longest_prefix_wins(
        parent in dotted_name(),
        child in "[a-z]{1,6}",
        outer in any_level(),
        inner in any_level(),
    ) {
        let nested = format!("{}.{}", parent, child);
        let config = LoggerConfiguration::new([
            (format!("{}.LEVEL", parent), outer.to_str()),
            (format!("{}.LEVEL", nested), inner.to_str()),
        ]);
        prop_assert_eq!(config.resolve_level(&format!("{}.Leaf", nested)), inner);
        prop_assert_eq!(config.resolve_level(&format!("{}.Other", parent)), outer);
    }

    /// Names outside every configured prefix get the defaults
    #[test]
    fn test_unconfigured_names_get_defaults(name in dotted_name()) {
        let config = LoggerConfiguration::new([("zz9.LEVEL", "ERROR"), ("zz9.STACKS", "true")]);
        prop_assume!(name != "zz9" && !name.starts_with("zz9."));
        prop_assert_eq!(config.resolve_level(&name), LogLevel::Info);
        prop_assert!(!config.resolve_hide_stacks(&name));
    }
}

// ============================================================================
// Formatting Tests
// ============================================================================

proptest! {
    /// Escaped records never span lines, whatever the message holds
    #[test]
    fn test_escaped_record_is_single_line(message in "\\PC*[\\n\\r\\t]?\\PC*") {
        let formatter = RecordFormatter::new(FormatterConfig::new().with_zone(TimeZoneSpec::Utc));
        let identity = LoggerIdentity::new("a.b.C", LogLevel::Info, false);
        let line = formatter.render(
            &identity,
            &LogEvent::new(LogLevel::Info, message).with_timestamp(0).with_thread("t"),
        );
        prop_assert!(!line.contains('\n'));
        prop_assert!(!line.contains('\r'));
        prop_assert!(!line.chars().any(char::is_control));
    }

    /// Placeholders without arguments are left intact
    #[test]
    fn test_template_without_args_is_verbatim(template in "[a-z {}]{0,30}") {
        prop_assert_eq!(format_message(&template, &[]).message, template);
    }

    /// Each argument fills exactly one placeholder, left to right
    #[test]
    fn test_placeholders_fill_in_order(values in prop::collection::vec(0u32..1000, 1..6)) {
        let template = vec!["{}"; values.len()].join(",");
        let args: Vec<LogArg> = values.iter().map(|v| LogArg::from(*v)).collect();
        let expected = values.iter().map(u32::to_string).collect::<Vec<_>>().join(",");
        prop_assert_eq!(format_message(&template, &args).message, expected);
    }

    /// Condensed names keep the last segment and one initial per other segment
    #[test]
    fn test_condensed_name_shape(name in dotted_name()) {
        let condensed = condense_name(&name);
        let parts: Vec<&str> = name.split('.').collect();
        let last = parts[parts.len() - 1];
        prop_assert!(condensed.ends_with(last));
        if parts.len() > 1 {
            prop_assert_eq!(condensed.len(), parts.len() - 1 + 1 + last.len());
        } else {
            prop_assert_eq!(condensed, name);
        }
    }
}
