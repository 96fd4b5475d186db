// ReportBar - platform/config.rs
//
// Platform-specific directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::composer::ChipMode;
use crate::core::datepicker::DatePreset;
use crate::util::constants;
use crate::util::error::{ConfigError, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for ReportBar configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/reportbar/ or %APPDATA%\ReportBar\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of a user product catalogue.
    pub fn default_products_file(&self) -> PathBuf {
        self.config_dir.join(constants::PRODUCTS_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[products]` section.
    pub products: ProductsSection,
    /// `[filters]` section.
    pub filters: FiltersSection,
    /// `[datepicker]` section.
    pub datepicker: DatepickerSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[products]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ProductsSection {
    /// Product catalogue file replacing the built-in one.
    pub file: Option<String>,
}

/// `[filters]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FiltersSection {
    /// Chip suppression mode: "origin" or "signature".
    pub chip_mode: Option<String>,
    /// Attribute allow-list for the add-filter form.
    pub attribute_keys: Option<Vec<String>>,
}

/// `[datepicker]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DatepickerSection {
    /// Preset applied at startup, e.g. "Last 7 days". Empty = unbounded.
    pub default_range: Option<String>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Products --
    /// User catalogue file (absolute, or relative to the config directory).
    pub products_file: Option<PathBuf>,

    // -- Filters --
    pub chip_mode: ChipMode,
    /// Attribute allow-list; `None` = built-in list.
    pub attribute_keys: Option<Vec<String>>,

    // -- Date picker --
    /// Startup preset; `None` = unbounded range.
    pub default_preset: Option<&'static DatePreset>,

    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Body font size in points.
    pub font_size: f32,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            products_file: None,
            chip_mode: ChipMode::default(),
            attribute_keys: None,
            default_preset: DatePreset::find(constants::DEFAULT_DATEPICKER_PRESET),
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with an error warning; the
/// application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    let content = match read_config_file(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            return (AppConfig::default(), vec![msg]);
        }
    };

    let (config, warnings) = parse_config(&content, config_dir);
    if warnings.is_empty() {
        tracing::info!(path = %config_path.display(), "Loaded config.toml");
    }
    (config, warnings)
}

fn read_config_file(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(content)
}

fn parse_raw_config(content: &str, path: &Path) -> Result<RawConfig> {
    let raw = toml::from_str(content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(raw)
}

/// Validate config.toml content. `config_dir` anchors relative paths.
pub fn parse_config(content: &str, config_dir: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    let raw = match parse_raw_config(content, &config_dir.join(constants::CONFIG_FILE_NAME)) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!(
                "{e}. Using defaults. See config.example.toml for the expected format."
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    // Validate each field, accumulating all problems.
    let mut config = AppConfig::default();

    // -- Products: file --
    if let Some(ref file) = raw.products.file {
        if !file.trim().is_empty() {
            let path = PathBuf::from(file.trim());
            config.products_file = Some(if path.is_absolute() {
                path
            } else {
                config_dir.join(path)
            });
        }
    }

    // -- Filters: chip_mode --
    if let Some(ref mode) = raw.filters.chip_mode {
        match ChipMode::from_name(mode) {
            Some(m) => config.chip_mode = m,
            None => warnings.push(format!(
                "[filters] chip_mode = \"{mode}\" is not recognised. \
                 Expected \"origin\" or \"signature\". Using default (origin).",
            )),
        }
    }

    // -- Filters: attribute_keys --
    if let Some(keys) = raw.filters.attribute_keys {
        let unknown: Vec<&String> = keys
            .iter()
            .filter(|k| !constants::QUERYABLE_KEYS.contains(&k.as_str()))
            .collect();
        if keys.is_empty() {
            warnings.push(
                "[filters] attribute_keys is empty. Using the built-in list.".to_string(),
            );
        } else if !unknown.is_empty() {
            warnings.push(format!(
                "[filters] attribute_keys contains unknown attributes {unknown:?}. \
                 Valid values: {}. Using the built-in list.",
                constants::QUERYABLE_KEYS.join(", ")
            ));
        } else {
            config.attribute_keys = Some(keys);
        }
    }

    // -- Date picker: default_range --
    if let Some(ref text) = raw.datepicker.default_range {
        if text.trim().is_empty() {
            config.default_preset = None;
        } else {
            match DatePreset::find(text) {
                Some(p) => config.default_preset = Some(p),
                None => warnings.push(format!(
                    "[datepicker] default_range = \"{text}\" is not a known preset. \
                     Using default ({}).",
                    constants::DEFAULT_DATEPICKER_PRESET
                )),
            }
        }
    }

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                warnings.push(format!(
                    "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
                ));
            }
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            let err = ConfigError::ValueOutOfRange {
                field: "ui.font_size".to_string(),
                value: size.to_string(),
                expected: format!("{}-{}", constants::MIN_FONT_SIZE, constants::MAX_FONT_SIZE),
            };
            warnings.push(format!(
                "{err}. Using default ({}).",
                constants::DEFAULT_FONT_SIZE
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}
