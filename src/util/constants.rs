// ReportBar - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "ReportBar";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "ReportBar";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Filter attributes
// =============================================================================

/// Attribute keys offered by the add-filter form, in display order.
/// The first entry is the draft's default key.
pub const FILTER_KEYS: &[&str] = &["request.path", "request.host", "response.status_code"];

/// Attribute keys the query evaluator understands. A superset of
/// `FILTER_KEYS` so that catalogue entries may target e.g. the method.
pub const QUERYABLE_KEYS: &[&str] = &[
    "request.path",
    "request.host",
    "request.method",
    "response.status_code",
];

/// Label of the "no product restriction" menu entry.
pub const ALL_REQUESTS_LABEL: &str = "All Requests";

/// Maximum number of non-fatal warnings kept in application state.
pub const MAX_WARNINGS: usize = 1_000;

/// Maximum regex pattern length accepted for a `matches` filter.
/// Longer patterns are searched as literal text.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4_096;

// =============================================================================
// Product catalogue limits
// =============================================================================

/// Maximum number of products a catalogue may define.
pub const MAX_PRODUCTS: usize = 64;

/// Maximum size of a product catalogue TOML file in bytes.
pub const MAX_CATALOG_FILE_SIZE: u64 = 64 * 1024; // 64 KB

// =============================================================================
// Request log limits
// =============================================================================

/// Maximum size of a request log file in bytes.
pub const MAX_REQUEST_LOG_FILE_SIZE: u64 = 512 * 1024 * 1024; // 512 MB

/// Hard upper bound on the number of request records held in memory.
pub const MAX_REQUEST_RECORDS: usize = 1_000_000;

/// Maximum number of malformed-line errors reported per request log.
/// Further malformed lines are counted but not individually reported.
pub const MAX_REQUEST_LOG_ERRORS: usize = 100;

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Date-picker preset applied at startup when the config names none.
pub const DEFAULT_DATEPICKER_PRESET: &str = "Last 24 hours";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default user product catalogue file name (in the config directory).
pub const PRODUCTS_FILE_NAME: &str = "products.toml";
