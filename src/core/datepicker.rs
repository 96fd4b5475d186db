// ReportBar - core/datepicker.rs
//
// Relative date-range presets offered next to the date picker.
// Core layer: the current time is always passed in.

use crate::core::model::DateRange;
use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// One preset button of the date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePreset {
    pub text: &'static str,
    /// Length of the window ending at "now".
    pub hours: i64,
}

/// Presets in display order.
pub const PRESETS: &[DatePreset] = &[
    DatePreset {
        text: "Last 24 hours",
        hours: 24,
    },
    DatePreset {
        text: "Last 7 days",
        hours: 24 * 7,
    },
    DatePreset {
        text: "Last 14 days",
        hours: 24 * 14,
    },
    DatePreset {
        text: "Last 28 days",
        hours: 24 * 28,
    },
];

impl DatePreset {
    /// Look up a preset by its display text (case-insensitive).
    pub fn find(text: &str) -> Option<&'static DatePreset> {
        PRESETS.iter().find(|p| p.text.eq_ignore_ascii_case(text.trim()))
    }

    /// The range this preset selects at `now`. The upper bound is left open
    /// so requests arriving after the preset was applied stay visible.
    pub fn range_at(&self, now: DateTime<Utc>) -> DateRange {
        let from = now - Duration::hours(self.hours);
        DateRange::new(from.to_rfc3339_opts(SecondsFormat::Secs, true), "")
    }
}

/// The preset whose range `range` currently equals at `now`, if any.
///
/// Used to highlight the active preset button; the comparison is to the
/// minute so a preset stays highlighted while the clock moves on.
pub fn active_preset(range: &DateRange, now: DateTime<Utc>) -> Option<&'static DatePreset> {
    let from = DateTime::parse_from_rfc3339(range.from.trim()).ok()?;
    if !range.to.trim().is_empty() {
        return None;
    }
    let span = now.signed_duration_since(from.with_timezone(&Utc));
    PRESETS
        .iter()
        .find(|p| (span - Duration::hours(p.hours)).num_minutes().abs() <= 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_last_24_hours() {
        let range = PRESETS[0].range_at(now());
        assert_eq!(range.from, "2026-10-18T12:00:00Z");
        assert_eq!(range.to, "");
    }

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(DatePreset::find("last 7 DAYS").map(|p| p.hours), Some(168));
        assert!(DatePreset::find("Last year").is_none());
    }

    #[test]
    fn test_active_preset_detection() {
        let range = PRESETS[2].range_at(now());
        let later = now() + Duration::seconds(30);
        assert_eq!(active_preset(&range, later).map(|p| p.text), Some("Last 14 days"));
        assert!(active_preset(&DateRange::default(), now()).is_none());
        let closed = DateRange::new(range.from.clone(), "2026-10-19T00:00:00Z");
        assert!(active_preset(&closed, now()).is_none());
    }
}
