// ReportBar - core/catalog.rs
//
// Product quick-filter catalogue: parsing, validation, and lookup.
// Core layer: accepts TOML strings, never touches the filesystem.
// File I/O is handled by app::catalog_loader which feeds content here.

use crate::core::model::{ProductFilter, ProductIcon, ProductKey};
use crate::util::constants;
use crate::util::error::CatalogError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Built-in catalogue, embedded at compile time.
const BUILTIN_CATALOG: &str = include_str!("../../products/builtin.toml");

// =============================================================================
// TOML deserialization structures (raw input)
// =============================================================================

/// Raw catalogue file as deserialized from TOML.
#[derive(Debug, Deserialize)]
pub struct CatalogDefinition {
    #[serde(default, rename = "product")]
    pub products: Vec<ProductDef>,
}

#[derive(Debug, Deserialize)]
pub struct ProductDef {
    pub key: String,
    pub filter_key: String,
    pub filter_value: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    pub icon: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

// =============================================================================
// Catalogue
// =============================================================================

/// Immutable, ordered table of product quick-filters keyed by product key.
///
/// Menu order follows definition order. Disabled products are kept for
/// lookup by key but are not yielded by [`ProductCatalog::enabled`].
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<ProductFilter>,
}

impl ProductCatalog {
    /// Build a catalogue, rejecting duplicate keys and oversize tables.
    pub fn new(products: Vec<ProductFilter>) -> Result<Self, CatalogError> {
        if products.len() > constants::MAX_PRODUCTS {
            return Err(CatalogError::TooManyProducts {
                count: products.len(),
                max: constants::MAX_PRODUCTS,
            });
        }
        let mut seen = HashSet::new();
        for p in &products {
            if !seen.insert(p.key.clone()) {
                return Err(CatalogError::DuplicateKey {
                    key: p.key.to_string(),
                });
            }
        }
        Ok(Self { products })
    }

    /// The catalogue embedded in the binary.
    ///
    /// A broken built-in table is a bug; it is logged and an empty
    /// catalogue is returned so the application still starts.
    pub fn builtin() -> Self {
        let path = Path::new("<builtin>/products.toml");
        match parse_catalog_toml(BUILTIN_CATALOG, path)
            .and_then(|def| validate_and_build(def, path))
            .and_then(Self::new)
        {
            Ok(catalog) => {
                tracing::debug!(products = catalog.len(), "Loaded built-in product catalogue");
                catalog
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load built-in product catalogue");
                Self::default()
            }
        }
    }

    /// Look up a product by key, including disabled products.
    pub fn get(&self, key: &ProductKey) -> Option<&ProductFilter> {
        self.products.iter().find(|p| &p.key == key)
    }

    /// Look up a product that may be offered in the menu.
    pub fn get_enabled(&self, key: &ProductKey) -> Option<&ProductFilter> {
        self.get(key).filter(|p| p.enabled)
    }

    /// Enabled products, in menu order.
    pub fn enabled(&self) -> impl Iterator<Item = &ProductFilter> {
        self.products.iter().filter(|p| p.enabled)
    }

    /// Total number of products, including disabled ones.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Parsing and validation
// =============================================================================

/// Parse a TOML string into a `CatalogDefinition`.
///
/// `source_path` is used for error messages only (not for I/O).
pub fn parse_catalog_toml(
    toml_content: &str,
    source_path: &Path,
) -> Result<CatalogDefinition, CatalogError> {
    toml::from_str(toml_content).map_err(|e| CatalogError::TomlParse {
        path: source_path.to_path_buf(),
        source: e,
    })
}

/// Validate every product definition and convert it to a `ProductFilter`.
///
/// Validates:
/// - key, label, filter_key and filter_value are non-empty
/// - filter_key is an attribute the query layer understands
/// - icon is a known icon name
pub fn validate_and_build(
    def: CatalogDefinition,
    source_path: &Path,
) -> Result<Vec<ProductFilter>, CatalogError> {
    let mut out = Vec::with_capacity(def.products.len());

    for p in def.products {
        let key = p.key.trim().to_string();
        if key.is_empty() {
            return Err(CatalogError::MissingField {
                product: "(empty)".to_string(),
                field: "key",
            });
        }
        for (field, value) in [
            ("label", &p.label),
            ("filter_key", &p.filter_key),
            ("filter_value", &p.filter_value),
        ] {
            if value.trim().is_empty() {
                return Err(CatalogError::MissingField {
                    product: key,
                    field,
                });
            }
        }
        if !constants::QUERYABLE_KEYS.contains(&p.filter_key.as_str()) {
            return Err(CatalogError::UnsupportedFilterKey {
                product: key,
                filter_key: p.filter_key,
            });
        }
        let Some(icon) = ProductIcon::from_name(&p.icon) else {
            return Err(CatalogError::UnknownIcon {
                product: key,
                icon: p.icon,
            });
        };

        tracing::trace!(
            product = %key,
            source = %source_path.display(),
            enabled = p.enabled,
            "Validated product definition"
        );

        out.push(ProductFilter {
            key: ProductKey::new(key),
            filter_key: p.filter_key,
            filter_value: p.filter_value,
            label: p.label,
            description: p.description,
            icon,
            enabled: p.enabled,
        });
    }

    Ok(out)
}

/// Parse, validate and build a catalogue from TOML content in one step.
pub fn catalog_from_toml(
    toml_content: &str,
    source_path: &Path,
) -> Result<ProductCatalog, CatalogError> {
    let def = parse_catalog_toml(toml_content, source_path)?;
    let products = validate_and_build(def, source_path)?;
    ProductCatalog::new(products)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PRODUCTS: &str = r#"
[[product]]
key = "rest"
filter_key = "request.path"
filter_value = "/rest"
label = "REST"
description = "Requests made to PostgREST"
icon = "database"

[[product]]
key = "api-gw"
filter_key = "request.host"
filter_value = "gw."
label = "Gateway"
icon = "zap"
enabled = false
"#;

    fn path() -> &'static Path {
        Path::new("test.toml")
    }

    #[test]
    fn test_builtin_catalog_has_five_enabled_products() {
        let catalog = ProductCatalog::builtin();
        let keys: Vec<&str> = catalog.enabled().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["rest", "auth", "storage", "realtime", "graphql"]);
        for p in catalog.enabled() {
            assert_eq!(p.filter_key, "request.path");
        }
    }

    #[test]
    fn test_builtin_disabled_product_is_still_known() {
        let catalog = ProductCatalog::builtin();
        let functions = ProductKey::from("functions");
        assert!(catalog.get(&functions).is_some());
        assert!(catalog.get_enabled(&functions).is_none());
    }

    #[test]
    fn test_parse_valid_catalog() {
        let catalog = catalog_from_toml(TWO_PRODUCTS, path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.enabled().count(), 1);
        let rest = catalog.get(&ProductKey::from("rest")).unwrap();
        assert_eq!(rest.icon, ProductIcon::Database);
        assert_eq!(rest.filter_value, "/rest");
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let toml = format!("{TWO_PRODUCTS}\n{}", TWO_PRODUCTS.replace("api-gw", "other"));
        let result = catalog_from_toml(&toml, path());
        assert!(matches!(result, Err(CatalogError::DuplicateKey { ref key }) if key == "rest"));
    }

    #[test]
    fn test_unsupported_filter_key_rejected() {
        let toml = TWO_PRODUCTS.replace("request.host", "request.body");
        let result = catalog_from_toml(&toml, path());
        assert!(matches!(
            result,
            Err(CatalogError::UnsupportedFilterKey { ref filter_key, .. }) if filter_key == "request.body"
        ));
    }

    #[test]
    fn test_empty_filter_value_rejected() {
        let toml = TWO_PRODUCTS.replace("filter_value = \"/rest\"", "filter_value = \"\"");
        let result = catalog_from_toml(&toml, path());
        assert!(matches!(
            result,
            Err(CatalogError::MissingField { field: "filter_value", .. })
        ));
    }

    #[test]
    fn test_unknown_icon_rejected() {
        let toml = TWO_PRODUCTS.replace("\"zap\"", "\"rocket\"");
        let result = catalog_from_toml(&toml, path());
        assert!(matches!(result, Err(CatalogError::UnknownIcon { .. })));
    }

    #[test]
    fn test_product_count_is_capped() {
        let make = |i: usize| ProductFilter {
            key: ProductKey::new(format!("p{i}")),
            filter_key: "request.path".to_string(),
            filter_value: format!("/p{i}"),
            label: format!("P{i}"),
            description: String::new(),
            icon: ProductIcon::Box,
            enabled: true,
        };

        let at_cap: Vec<ProductFilter> = (0..constants::MAX_PRODUCTS).map(make).collect();
        assert_eq!(ProductCatalog::new(at_cap).unwrap().len(), constants::MAX_PRODUCTS);

        let over: Vec<ProductFilter> = (0..=constants::MAX_PRODUCTS).map(make).collect();
        assert!(matches!(
            ProductCatalog::new(over),
            Err(CatalogError::TooManyProducts { count, max })
                if count == constants::MAX_PRODUCTS + 1 && max == constants::MAX_PRODUCTS
        ));
    }

    #[test]
    fn test_invalid_toml() {
        let result = catalog_from_toml("[[product]\nkey=", path());
        assert!(matches!(result, Err(CatalogError::TomlParse { .. })));
    }
}
