// ReportBar - app/catalog_loader.rs
//
// Chooses and loads the product catalogue at startup.
// Precedence: explicit path (CLI or config) > per-user products.toml > built-in.
// A broken user catalogue never prevents startup; the built-in table is used
// and the problem is reported as a warning.

use crate::core::catalog::{self, ProductCatalog};
use crate::util::constants;
use crate::util::error::{CatalogError, ReportBarError, Result};
use std::path::Path;

/// Load a catalogue from a TOML file on disk.
pub fn load_catalog_file(path: &Path) -> Result<ProductCatalog> {
    let metadata = std::fs::metadata(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    if metadata.len() > constants::MAX_CATALOG_FILE_SIZE {
        return Err(CatalogError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: constants::MAX_CATALOG_FILE_SIZE,
        }
        .into());
    }

    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let catalog = catalog::catalog_from_toml(&content, path)?;
    tracing::info!(
        path = %path.display(),
        products = catalog.len(),
        "Loaded product catalogue"
    );
    Ok(catalog)
}

/// Resolve the catalogue to use.
///
/// `explicit` is the CLI `--products` value or the config `[products] file`.
/// When it is absent, `user_default` is tried only if it exists.
///
/// Returns the catalogue plus any non-fatal errors encountered on the way.
pub fn resolve_catalog(
    explicit: Option<&Path>,
    user_default: &Path,
) -> (ProductCatalog, Vec<ReportBarError>) {
    let mut errors = Vec::new();

    let candidate = match explicit {
        Some(path) => Some(path),
        None if user_default.is_file() => Some(user_default),
        None => {
            tracing::debug!(
                path = %user_default.display(),
                "No user product catalogue (using built-in)"
            );
            None
        }
    };

    if let Some(path) = candidate {
        match load_catalog_file(path) {
            Ok(catalog) => return (catalog, errors),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Product catalogue rejected, falling back to built-in"
                );
                errors.push(e);
            }
        }
    }

    (ProductCatalog::builtin(), errors)
}
