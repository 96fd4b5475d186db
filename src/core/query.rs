// ReportBar - core/query.rs
//
// Applies the active filter list and date range to request records, and
// renders the same selection as a WHERE clause for the log backend.
// All filters are AND-combined.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{Compare, DateRange, FilterItem, RequestRecord};
use crate::util::constants;
use chrono::{DateTime, Utc};
use regex::Regex;

/// A filter prepared for repeated evaluation.
enum CompiledFilter<'a> {
    Is { key: &'a str, value: &'a str },
    Regex { key: &'a str, regex: Regex },
    Contains { key: &'a str, needle: &'a str },
}

impl<'a> CompiledFilter<'a> {
    fn compile(filter: &'a FilterItem) -> Self {
        let key = filter.key.as_str();
        match filter.compare {
            Compare::Is => Self::Is {
                key,
                value: &filter.value,
            },
            Compare::Matches => {
                if filter.value.len() > constants::MAX_REGEX_PATTERN_LENGTH {
                    return Self::Contains {
                        key,
                        needle: &filter.value,
                    };
                }
                match Regex::new(&filter.value) {
                    Ok(regex) => Self::Regex { key, regex },
                    Err(e) => {
                        tracing::debug!(
                            pattern = %filter.value,
                            error = %e,
                            "Invalid pattern; matching as literal text"
                        );
                        Self::Contains {
                            key,
                            needle: &filter.value,
                        }
                    }
                }
            }
        }
    }

    fn matches(&self, record: &RequestRecord) -> bool {
        match self {
            Self::Is { key, value } => record.attribute(key).is_some_and(|v| v == *value),
            Self::Regex { key, regex } => {
                record.attribute(key).is_some_and(|v| regex.is_match(&v))
            }
            Self::Contains { key, needle } => {
                record.attribute(key).is_some_and(|v| v.contains(*needle))
            }
        }
    }
}

/// Parsed bounds of a date range. Unparseable bounds are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeBounds {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeBounds {
    pub fn from_range(range: &DateRange) -> Self {
        Self {
            start: parse_bound(&range.from),
            end: parse_bound(&range.to),
        }
    }

    fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start.map_or(true, |s| ts >= s) && self.end.map_or(true, |e| ts <= e)
    }
}

/// Parse one RFC 3339 bound. Empty text means "no bound".
pub fn parse_bound(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    match DateTime::parse_from_rfc3339(trimmed) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!(bound = trimmed, error = %e, "Ignoring unparseable date bound");
            None
        }
    }
}

/// Apply filters and date range, returning indices of matching records.
///
/// Returns indices into `records` so the view can scroll over the
/// filtered set without copying.
pub fn apply_filters(
    records: &[RequestRecord],
    filters: &[FilterItem],
    range: &DateRange,
) -> Vec<usize> {
    let bounds = TimeBounds::from_range(range);
    if filters.is_empty() && bounds == TimeBounds::default() {
        return (0..records.len()).collect();
    }

    let compiled: Vec<CompiledFilter<'_>> = filters.iter().map(CompiledFilter::compile).collect();

    records
        .iter()
        .enumerate()
        .filter(|(_, r)| bounds.contains(r.timestamp) && compiled.iter().all(|f| f.matches(r)))
        .map(|(idx, _)| idx)
        .collect()
}

// =============================================================================
// WHERE clause rendering
// =============================================================================

/// Render filters and date range as a backend WHERE clause body.
///
/// `matches` becomes `REGEXP_CONTAINS(key, 'value')` and `is` becomes
/// `key = 'value'`, with a bare integer for numeric status codes.
/// Returns an empty string when nothing constrains the query.
pub fn where_clause(filters: &[FilterItem], range: &DateRange) -> String {
    let mut parts: Vec<String> = filters.iter().map(render_filter).collect();

    let bounds = TimeBounds::from_range(range);
    if let Some(start) = bounds.start {
        parts.push(format!("timestamp >= '{}'", start.to_rfc3339()));
    }
    if let Some(end) = bounds.end {
        parts.push(format!("timestamp <= '{}'", end.to_rfc3339()));
    }

    parts.join(" AND ")
}

fn render_filter(filter: &FilterItem) -> String {
    match filter.compare {
        Compare::Matches => format!(
            "REGEXP_CONTAINS({}, '{}')",
            filter.key,
            escape_literal(&filter.value)
        ),
        Compare::Is => {
            if filter.key == "response.status_code" && filter.value.parse::<u16>().is_ok() {
                format!("{} = {}", filter.key, filter.value)
            } else {
                format!("{} = '{}'", filter.key, escape_literal(&filter.value))
            }
        }
    }
}

fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{FilterOrigin, ProductKey, RequestInfo, ResponseInfo};

    fn make_record(ts: &str, path: &str, host: &str, status: u16) -> RequestRecord {
        RequestRecord {
            timestamp: DateTime::parse_from_rfc3339(ts).unwrap().with_timezone(&Utc),
            request: RequestInfo {
                method: "GET".to_string(),
                host: host.to_string(),
                path: path.to_string(),
                user_agent: None,
            },
            response: ResponseInfo {
                status_code: status,
                duration_ms: None,
            },
        }
    }

    fn sample() -> Vec<RequestRecord> {
        vec![
            make_record("2026-10-01T10:00:00Z", "/rest/v1/todos", "a.example.co", 200),
            make_record("2026-10-01T11:00:00Z", "/auth/v1/token", "a.example.co", 400),
            make_record("2026-10-01T12:00:00Z", "/storage/v1/object", "b.example.co", 500),
            make_record("2026-10-01T13:00:00Z", "/rest/v1/items", "b.example.co", 500),
        ]
    }

    #[test]
    fn test_no_filters_returns_all() {
        let records = sample();
        assert_eq!(apply_filters(&records, &[], &DateRange::default()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_matches_uses_regex_search() {
        let records = sample();
        let filters = vec![FilterItem {
            key: "request.path".to_string(),
            compare: Compare::Matches,
            value: "/rest".to_string(),
            origin: FilterOrigin::QuickFilter(ProductKey::from("rest")),
        }];
        assert_eq!(apply_filters(&records, &filters, &DateRange::default()), vec![0, 3]);
    }

    #[test]
    fn test_filters_are_and_combined() {
        let records = sample();
        let filters = vec![
            FilterItem::manual("request.path", Compare::Matches, "^/rest"),
            FilterItem::manual("response.status_code", Compare::Is, "500"),
        ];
        assert_eq!(apply_filters(&records, &filters, &DateRange::default()), vec![3]);
    }

    #[test]
    fn test_invalid_regex_falls_back_to_literal() {
        let mut records = sample();
        records[1].request.path = "/auth/[v1".to_string();
        let filters = vec![FilterItem::manual("request.path", Compare::Matches, "[v1")];
        assert_eq!(apply_filters(&records, &filters, &DateRange::default()), vec![1]);
    }

    #[test]
    fn test_unknown_attribute_never_matches() {
        let records = sample();
        let filters = vec![FilterItem::manual("request.body", Compare::Is, "")];
        assert!(apply_filters(&records, &filters, &DateRange::default()).is_empty());
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let records = sample();
        let range = DateRange::new("2026-10-01T11:00:00Z", "2026-10-01T12:00:00Z");
        assert_eq!(apply_filters(&records, &[], &range), vec![1, 2]);
    }

    #[test]
    fn test_unparseable_bound_is_ignored() {
        let records = sample();
        let range = DateRange::new("yesterday", "2026-10-01T10:30:00Z");
        assert_eq!(apply_filters(&records, &[], &range), vec![0]);
    }

    #[test]
    fn test_where_clause_rendering() {
        let filters = vec![
            FilterItem::manual("request.path", Compare::Matches, "/storage"),
            FilterItem::manual("response.status_code", Compare::Is, "500"),
            FilterItem::manual("request.host", Compare::Is, "o'brien.example.co"),
        ];
        let range = DateRange::new("2026-10-01T00:00:00Z", "");
        assert_eq!(
            where_clause(&filters, &range),
            "REGEXP_CONTAINS(request.path, '/storage') AND response.status_code = 500 \
             AND request.host = 'o\\'brien.example.co' AND timestamp >= '2026-10-01T00:00:00+00:00'"
        );
    }

    #[test]
    fn test_where_clause_empty() {
        assert_eq!(where_clause(&[], &DateRange::default()), "");
    }

    #[test]
    fn test_non_numeric_status_is_quoted() {
        let filters = vec![FilterItem::manual("response.status_code", Compare::Is, "5xx")];
        assert_eq!(
            where_clause(&filters, &DateRange::default()),
            "response.status_code = '5xx'"
        );
    }
}
