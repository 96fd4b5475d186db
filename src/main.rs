// ReportBar - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation
// 3. Product catalogue loading (user file or built-in)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can keep using
// `crate::app::...`, `crate::ui::...` etc.
pub use reportbar::app;

pub use reportbar::core;
pub use reportbar::platform;
pub use reportbar::ui;
pub use reportbar::util;

use clap::Parser;
use std::path::PathBuf;

/// ReportBar - request-log report viewer with product quick-filters.
///
/// Open a JSON-lines request log and narrow it down by product, attribute
/// filters and date range.
#[derive(Parser, Debug)]
#[command(name = "ReportBar", version, about)]
struct Cli {
    /// Request log to open on startup (JSON lines or a JSON array).
    path: Option<PathBuf>,

    /// Product catalogue TOML file (overrides config and the built-in table).
    #[arg(short = 'p', long = "products")]
    products: Option<PathBuf>,

    /// How product chips are told apart from manual filters: origin or signature.
    #[arg(short = 'c', long = "chip-mode")]
    chip_mode: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging so its [logging] level can take effect.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config_dir = %platform_paths.config_dir.display(),
        "ReportBar starting"
    );
    for w in &config_warnings {
        tracing::warn!(warning = %w, "Config warning");
    }

    let mut warnings = config_warnings;

    // Catalogue: CLI override > config file entry > per-user default > built-in
    let explicit = cli.products.clone().or_else(|| config.products_file.clone());
    let (catalog, catalog_errors) = app::catalog_loader::resolve_catalog(
        explicit.as_deref(),
        &platform_paths.default_products_file(),
    );
    warnings.extend(catalog_errors.iter().map(|e| e.to_string()));

    // Chip mode: CLI override > config
    let chip_mode = match cli.chip_mode.as_deref() {
        Some(name) => match core::composer::ChipMode::from_name(name) {
            Some(mode) => mode,
            None => {
                let msg = format!(
                    "Unknown chip mode '{name}' (expected 'origin' or 'signature'); using '{}'",
                    config.chip_mode.as_str()
                );
                tracing::warn!("{}", msg);
                warnings.push(msg);
                config.chip_mode
            }
        },
        None => config.chip_mode,
    };

    let mut composer = core::composer::FilterComposer::new(catalog, chip_mode);
    if let Some(keys) = config.attribute_keys.clone() {
        composer = composer.with_attribute_keys(keys);
    }

    let date_range = config
        .default_preset
        .map(|preset| preset.range_at(chrono::Utc::now()))
        .unwrap_or_default();

    tracing::info!(
        products = composer.catalog().len(),
        chip_mode = chip_mode.as_str(),
        "Ready to launch GUI"
    );

    let mut state = app::state::AppState::new(composer, date_range, cli.debug);
    state.dark_mode = config.dark_mode;
    state.ui_font_size = config.font_size;
    for w in warnings {
        state.push_warning(w);
    }
    if let Some(ref path) = cli.path {
        state.pending_open = Some(path.clone());
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |_cc| Ok(Box::new(gui::ReportBarApp::new(state)))),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch ReportBar GUI: {e}");
        std::process::exit(1);
    }
}
