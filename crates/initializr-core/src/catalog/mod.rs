//! Option catalog retrieval and parsing
//!
//! This module provides:
//! - Catalog types (OptionCatalog, OptionField, Choice, ChoiceGroup)
//! - Catalog fetching from the Initializr service with a bundled fallback

pub mod fetcher;
pub mod model;

pub use fetcher::{CatalogFetcher, CatalogOrigin, ResolvedCatalog, CATALOG_MEDIA_TYPE};
pub use model::{CatalogError, Choice, ChoiceGroup, OptionCatalog, OptionField, UnsupportedField};

/// Snapshot of the service catalog shipped with the binary
const BUNDLED_CATALOG: &str = include_str!("spring.json");

/// Parse the bundled catalog snapshot
pub fn bundled() -> Result<OptionCatalog, CatalogError> {
    OptionCatalog::from_json(BUNDLED_CATALOG)
}
