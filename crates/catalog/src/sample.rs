//! Built-in demo catalog (lighting, projectors, audio gear).

use gala_core::{DomainError, DomainResult};

use crate::catalog::Catalog;
use crate::item::CatalogItem;

const SAMPLE_CATALOG_JSON: &str = include_str!("../data/sample_catalog.json");

pub fn items() -> DomainResult<Vec<CatalogItem>> {
    parse_items(SAMPLE_CATALOG_JSON)
}

/// Parse a JSON array of catalog items.
pub fn parse_items(json: &str) -> DomainResult<Vec<CatalogItem>> {
    serde_json::from_str(json).map_err(|e| DomainError::validation(format!("catalog data: {e}")))
}

/// The demo catalog, with every item validated through `AddItem`.
pub fn catalog() -> DomainResult<Catalog> {
    Catalog::seeded(items()?)
}
