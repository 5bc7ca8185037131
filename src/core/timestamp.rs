//! Timestamp rendering for record prefixes
//!
//! Records carry `yyyy-MM-dd HH:mm:ss.mmm` in a configured zone. The
//! calendar/zone conversion is done once per whole second and cached per
//! [`TimestampCache`]; only the millisecond suffix is rendered every call.

use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use chrono_tz::Tz;
use parking_lot::Mutex;
use std::fmt::Write as _;

const SECONDS_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// Zone in which record timestamps are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZoneSpec {
    /// The system zone of the running process
    #[default]
    Local,
    Utc,
    /// A fixed offset such as `+05:30` or `GMT-08:00`
    Fixed(FixedOffset),
    /// An IANA zone such as `Europe/Berlin`
    Named(Tz),
}

impl TimeZoneSpec {
    /// Parse a zone identifier.
    ///
    /// Accepts `UTC`, `GMT`, `UT`, `Z`, fixed offsets (`+05:30`, `-0800`,
    /// `GMT+2`, `UTC-03:00`) and IANA identifiers. Returns `None` for anything
    /// else.
    pub fn parse(id: &str) -> Option<Self> {
        let id = id.trim();
        match id {
            "" => return None,
            "UTC" | "GMT" | "UT" | "Z" => return Some(TimeZoneSpec::Utc),
            _ => {}
        }

        let offset_part = ["UTC", "GMT", "UT"]
            .iter()
            .find_map(|prefix| id.strip_prefix(prefix))
            .unwrap_or(id);
        if offset_part.starts_with('+') || offset_part.starts_with('-') {
            return parse_offset(offset_part).map(TimeZoneSpec::Fixed);
        }

        id.parse::<Tz>().ok().map(TimeZoneSpec::Named)
    }

    /// Render whole epoch seconds as `yyyy-MM-dd HH:mm:ss` in this zone.
    pub fn format_seconds(&self, epoch_seconds: i64) -> String {
        let Some(utc) = DateTime::<Utc>::from_timestamp(epoch_seconds, 0) else {
            return epoch_seconds.to_string();
        };
        match self {
            TimeZoneSpec::Local => render(utc.with_timezone(&Local)),
            TimeZoneSpec::Utc => render(utc),
            TimeZoneSpec::Fixed(offset) => render(utc.with_timezone(offset)),
            TimeZoneSpec::Named(tz) => render(utc.with_timezone(tz)),
        }
    }
}

fn render<Z: TimeZone>(datetime: DateTime<Z>) -> String
where
    Z::Offset: std::fmt::Display,
{
    datetime.format(SECONDS_PATTERN).to_string()
}

/// `+h`, `+hh`, `+hhmm`, `+hh:mm` (and the `-` forms).
fn parse_offset(text: &str) -> Option<FixedOffset> {
    let (sign, digits) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    let (hours, minutes) = match digits.split_once(':') {
        Some((h, m)) => (h, m),
        None if digits.len() > 2 => digits.split_at(digits.len() - 2),
        None => (digits, "0"),
    };
    if hours.is_empty() || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 18 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Per-instance cache of the last rendered whole second.
///
/// Shared use is safe: a contended lock falls back to rendering without the
/// cache, so a miss only costs a recompute.
#[derive(Debug, Default)]
pub struct TimestampCache {
    zone: TimeZoneSpec,
    last: Mutex<Option<(i64, String)>>,
}

impl TimestampCache {
    pub fn new(zone: TimeZoneSpec) -> Self {
        Self {
            zone,
            last: Mutex::new(None),
        }
    }

    pub fn zone(&self) -> TimeZoneSpec {
        self.zone
    }

    /// Append `yyyy-MM-dd HH:mm:ss.mmm` for `epoch_millis` to `out`.
    pub fn format_into(&self, epoch_millis: i64, out: &mut String) {
        let seconds = epoch_millis.div_euclid(1000);
        let millis = epoch_millis.rem_euclid(1000);

        match self.last.try_lock() {
            Some(mut cache) => {
                let hit = matches!(cache.as_ref(), Some((cached, _)) if *cached == seconds);
                if !hit {
                    *cache = Some((seconds, self.zone.format_seconds(seconds)));
                }
                if let Some((_, text)) = cache.as_ref() {
                    out.push_str(text);
                }
            }
            None => out.push_str(&self.zone.format_seconds(seconds)),
        }

        let _ = write!(out, ".{:03}", millis);
    }

    pub fn format(&self, epoch_millis: i64) -> String {
        let mut out = String::with_capacity(23);
        self.format_into(epoch_millis, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2020-02-17 19:11:35.563 UTC
    const FIXED_MILLIS: i64 = 1_581_966_695_563;

    #[test]
    fn test_utc_format() {
        let cache = TimestampCache::new(TimeZoneSpec::Utc);
        assert_eq!(cache.format(FIXED_MILLIS), "2020-02-17 19:11:35.563");
    }

    #[test]
    fn test_millis_zero_padded() {
        let cache = TimestampCache::new(TimeZoneSpec::Utc);
        assert_eq!(cache.format(1_581_966_695_035), "2020-02-17 19:11:35.035");
        assert_eq!(cache.format(1_581_966_695_007), "2020-02-17 19:11:35.007");
        assert_eq!(cache.format(1_581_966_695_000), "2020-02-17 19:11:35.000");
    }

    #[test]
    fn test_cache_reused_within_second_and_refreshed_after() {
        let cache = TimestampCache::new(TimeZoneSpec::Utc);
        assert_eq!(cache.format(FIXED_MILLIS), "2020-02-17 19:11:35.563");
        assert_eq!(cache.format(FIXED_MILLIS + 100), "2020-02-17 19:11:35.663");
        assert_eq!(cache.format(FIXED_MILLIS + 500), "2020-02-17 19:11:36.063");
        // Going backwards recomputes as well.
        assert_eq!(cache.format(FIXED_MILLIS - 1000), "2020-02-17 19:11:34.563");
    }

    #[test]
    fn test_negative_epoch() {
        let cache = TimestampCache::new(TimeZoneSpec::Utc);
        assert_eq!(cache.format(-1), "1969-12-31 23:59:59.999");
    }

    #[test]
    fn test_fixed_offset_and_named_zone() {
        let plus = TimestampCache::new(TimeZoneSpec::parse("+05:30").unwrap());
        assert_eq!(plus.format(FIXED_MILLIS), "2020-02-18 00:41:35.563");

        let berlin = TimestampCache::new(TimeZoneSpec::parse("Europe/Berlin").unwrap());
        assert_eq!(berlin.format(FIXED_MILLIS), "2020-02-17 20:11:35.563");
    }

    #[test]
    fn test_parse_zone_ids() {
        assert_eq!(TimeZoneSpec::parse("UTC"), Some(TimeZoneSpec::Utc));
        assert_eq!(TimeZoneSpec::parse("GMT"), Some(TimeZoneSpec::Utc));
        assert_eq!(
            TimeZoneSpec::parse("GMT-8"),
            Some(TimeZoneSpec::Fixed(FixedOffset::west_opt(8 * 3600).unwrap()))
        );
        assert_eq!(
            TimeZoneSpec::parse("-0330"),
            Some(TimeZoneSpec::Fixed(FixedOffset::west_opt(3 * 3600 + 1800).unwrap()))
        );
        assert!(matches!(
            TimeZoneSpec::parse("America/New_York"),
            Some(TimeZoneSpec::Named(_))
        ));
        assert_eq!(TimeZoneSpec::parse("Mars/Olympus"), None);
        assert_eq!(TimeZoneSpec::parse("+25:00"), None);
        assert_eq!(TimeZoneSpec::parse(""), None);
    }
}
