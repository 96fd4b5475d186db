// ReportBar - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Filter predicates
// =============================================================================

/// Comparison operator of a filter predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compare {
    /// Exact equality of the attribute's textual value.
    #[default]
    Is,
    /// Regular-expression search within the attribute's textual value.
    Matches,
}

impl Compare {
    /// Returns all variants in the order the add-filter form lists them.
    pub fn all() -> &'static [Compare] {
        &[Compare::Matches, Compare::Is]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Compare::Is => "is",
            Compare::Matches => "matches",
        }
    }
}

impl fmt::Display for Compare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identifier of a product quick-filter (e.g. `"rest"`, `"auth"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductKey(String);

impl ProductKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which control produced a filter.
///
/// Quick-filter predicates are tagged with their product so they can be
/// told apart from a manual filter that happens to have the same
/// key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOrigin {
    #[default]
    Manual,
    QuickFilter(ProductKey),
}

/// One predicate applied to a report query.
///
/// Equality covers the origin tag: removing a manual `request.path matches
/// /auth` never removes the Auth quick-filter's predicate, and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterItem {
    /// Attribute path, e.g. `request.path`.
    pub key: String,
    pub compare: Compare,
    /// Free text; may be empty.
    pub value: String,
    #[serde(default)]
    pub origin: FilterOrigin,
}

impl FilterItem {
    /// Build a manually composed filter.
    pub fn manual(key: impl Into<String>, compare: Compare, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            compare,
            value: value.into(),
            origin: FilterOrigin::Manual,
        }
    }
}

impl fmt::Display for FilterItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.key, self.compare, self.value)
    }
}

// =============================================================================
// Product quick-filters
// =============================================================================

/// Icon shown next to a product in the quick-filter menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductIcon {
    Database,
    Key,
    Box,
    Zap,
    ZapOff,
    Code,
}

impl ProductIcon {
    /// Parse the icon name used in catalogue files.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "database" => Some(Self::Database),
            "key" => Some(Self::Key),
            "box" => Some(Self::Box),
            "zap" => Some(Self::Zap),
            "zap-off" | "zap_off" => Some(Self::ZapOff),
            "code" => Some(Self::Code),
            _ => None,
        }
    }

    /// Glyph rendered in the menu.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Database => "\u{1f5c4}",
            Self::Key => "\u{1f511}",
            Self::Box => "\u{1f4e6}",
            Self::Zap => "\u{26a1}",
            Self::ZapOff => "\u{2300}",
            Self::Code => "\u{2328}",
        }
    }
}

/// Immutable descriptor of one product quick-filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    pub key: ProductKey,
    /// Attribute the predicate targets (built-ins all use `request.path`).
    pub filter_key: String,
    /// Pattern matched against `filter_key`, e.g. `/storage`.
    pub filter_value: String,
    pub label: String,
    pub description: String,
    pub icon: ProductIcon,
    /// Disabled products are validated but never offered in the menu.
    pub enabled: bool,
}

impl ProductFilter {
    /// The predicate this product contributes to the filter list.
    pub fn predicate(&self) -> FilterItem {
        FilterItem {
            key: self.filter_key.clone(),
            compare: Compare::Matches,
            value: self.filter_value.clone(),
            origin: FilterOrigin::QuickFilter(self.key.clone()),
        }
    }
}

// =============================================================================
// Date range
// =============================================================================

/// Date range as produced by the date picker.
///
/// Bounds are passed through verbatim; empty strings mean "unbounded".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

impl DateRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.trim().is_empty() && self.to.trim().is_empty()
    }
}

// =============================================================================
// Request records
// =============================================================================

/// One edge request from the request log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub timestamp: DateTime<Utc>,
    pub request: RequestInfo,
    pub response: ResponseInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestInfo {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub host: String,
    pub path: String,
    #[serde(default)]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseInfo {
    pub status_code: u16,
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

impl RequestRecord {
    /// Textual value of a filterable attribute, or `None` if unknown.
    pub fn attribute(&self, key: &str) -> Option<String> {
        match key {
            "request.path" => Some(self.request.path.clone()),
            "request.host" => Some(self.request.host.clone()),
            "request.method" => Some(self.request.method.clone()),
            "response.status_code" => Some(self.response.status_code.to_string()),
            _ => None,
        }
    }
}
