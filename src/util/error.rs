// ReportBar - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation: every subsystem has its own enum and
// the causal chain is kept for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all ReportBar operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum ReportBarError {
    /// Product catalogue loading or validation failed.
    Catalog(CatalogError),

    /// Request log loading failed.
    RequestLog(RequestLogError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl fmt::Display for ReportBarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(e) => write!(f, "Product catalogue error: {e}"),
            Self::RequestLog(e) => write!(f, "Request log error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for ReportBarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalog(e) => Some(e),
            Self::RequestLog(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Catalogue errors
// ---------------------------------------------------------------------------

/// Errors related to product catalogue loading and validation.
#[derive(Debug)]
pub enum CatalogError {
    /// TOML file could not be parsed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Catalogue file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A required field is missing or empty.
    MissingField {
        product: String,
        field: &'static str,
    },

    /// The product targets an attribute the query layer does not know.
    UnsupportedFilterKey { product: String, filter_key: String },

    /// The icon name is not one of the known icons.
    UnknownIcon { product: String, icon: String },

    /// Two products share the same key.
    DuplicateKey { key: String },

    /// Maximum number of products exceeded.
    TooManyProducts { count: usize, max: usize },

    /// I/O error reading a catalogue file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Failed to parse TOML '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Catalogue '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::MissingField { product, field } => {
                write!(f, "Product '{product}': missing required field '{field}'")
            }
            Self::UnsupportedFilterKey {
                product,
                filter_key,
            } => write!(
                f,
                "Product '{product}': filter_key '{filter_key}' is not a queryable attribute"
            ),
            Self::UnknownIcon { product, icon } => {
                write!(f, "Product '{product}': unknown icon '{icon}'")
            }
            Self::DuplicateKey { key } => write!(f, "Duplicate product key '{key}'"),
            Self::TooManyProducts { count, max } => {
                write!(f, "Too many products defined ({count}), maximum is {max}")
            }
            Self::Io { path, source } => {
                write!(
                    f,
                    "I/O error reading catalogue '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<CatalogError> for ReportBarError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

// ---------------------------------------------------------------------------
// Request log errors
// ---------------------------------------------------------------------------

/// Errors related to loading a request log file.
#[derive(Debug)]
pub enum RequestLogError {
    /// I/O error while reading the file.
    Io { path: PathBuf, source: io::Error },

    /// The file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A JSON Lines record could not be decoded.
    LineParse {
        path: PathBuf,
        line_number: u64,
        source: serde_json::Error,
    },

    /// The file looked like a JSON array but could not be decoded.
    ArrayParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The file holds more records than the in-memory cap.
    TooManyRecords { path: PathBuf, max: usize },
}

impl fmt::Display for RequestLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "'{}': I/O error: {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "'{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::LineParse {
                path,
                line_number,
                source,
            } => write!(
                f,
                "'{}' line {line_number}: invalid request record: {source}",
                path.display()
            ),
            Self::ArrayParse { path, source } => {
                write!(f, "'{}': invalid JSON array: {source}", path.display())
            }
            Self::TooManyRecords { path, max } => write!(
                f,
                "'{}': more than {max} records; remaining records were not loaded",
                path.display()
            ),
        }
    }
}

impl std::error::Error for RequestLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::LineParse { source, .. } => Some(source),
            Self::ArrayParse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<RequestLogError> for ReportBarError {
    fn from(e: RequestLogError) -> Self {
        Self::RequestLog(e)
    }
}

// ---------------------------------------------------------------------------
// Composer errors
// ---------------------------------------------------------------------------

/// User actions the filter composer refuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerError {
    /// The attribute is not in the add-filter allow-list.
    UnknownAttribute { key: String },

    /// No enabled catalogue product has this key.
    UnknownProduct { key: String },
}

impl fmt::Display for ComposerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAttribute { key } => {
                write!(f, "'{key}' is not a filterable attribute")
            }
            Self::UnknownProduct { key } => write!(f, "Unknown product filter '{key}'"),
        }
    }
}

impl std::error::Error for ComposerError {}

// ---------------------------------------------------------------------------
// Filter change errors
// ---------------------------------------------------------------------------

/// Errors reported by the owner of the filter list when asked to add or
/// remove a filter. `filter` is the display form ("key compare value").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChangeError {
    /// An identical filter is already active.
    Duplicate { filter: String },

    /// The filter to remove is not active.
    NotFound { filter: String },

    /// The owner refused the change for another reason. The in-process
    /// list never produces this; sinks that forward to a backend use it for
    /// failures such as an unreachable log service.
    Rejected { filter: String, reason: String },
}

impl fmt::Display for FilterChangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate { filter } => write!(f, "filter '{filter}' is already active"),
            Self::NotFound { filter } => write!(f, "filter '{filter}' is not active"),
            Self::Rejected { filter, reason } => {
                write!(f, "filter '{filter}' was rejected: {reason}")
            }
        }
    }
}

impl std::error::Error for FilterChangeError {}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for ReportBarError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for ReportBar results.
pub type Result<T> = std::result::Result<T, ReportBarError>;
