//! Catalog fetching from the Initializr service
//!
//! The service root answers with the option catalog when asked for the
//! Initializr metadata media type. Any failure along the way falls back to
//! the snapshot bundled with the binary.

use super::model::OptionCatalog;
use crate::product::ProductConfig;
use crate::service;
use anyhow::{Context, Result};
use reqwest::header::ACCEPT;
use url::Url;

/// Media type of the catalog document
pub const CATALOG_MEDIA_TYPE: &str = "application/vnd.initializr.v2.1+json";

/// Where the catalog in use came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOrigin {
    Remote(Url),
    /// Bundled snapshot, with the reason the remote one was not used
    Bundled { reason: String },
}

#[derive(Debug, Clone)]
pub struct ResolvedCatalog {
    pub catalog: OptionCatalog,
    pub origin: CatalogOrigin,
}

/// Retrieves the option catalog from the service root
pub struct CatalogFetcher {
    base_url: Url,
    client: reqwest::Client,
}

impl CatalogFetcher {
    pub fn new(base_url: Url, user_agent: &str) -> Self {
        Self {
            base_url,
            client: service::http_client(user_agent),
        }
    }

    /// Create a fetcher from a product config, honouring the URL override env var
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let url = service::service_url(config, None)?;
        Ok(Self::new(url, config.user_agent()))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch and parse the remote catalog
    pub async fn fetch_remote(&self) -> Result<OptionCatalog> {
        let response = self
            .client
            .get(self.base_url.clone())
            .header(ACCEPT, CATALOG_MEDIA_TYPE)
            .send()
            .await
            .with_context(|| format!("Failed to fetch options from {}", self.base_url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to fetch options from {}: HTTP {}",
                self.base_url,
                response.status()
            );
        }

        let content = response.text().await?;
        OptionCatalog::from_json(&content).context("Failed to parse option catalog")
    }

    /// Fetch the remote catalog, substituting the bundled one on any failure
    pub async fn fetch_or_bundled(&self) -> Result<ResolvedCatalog> {
        match self.fetch_remote().await {
            Ok(catalog) => Ok(ResolvedCatalog {
                catalog,
                origin: CatalogOrigin::Remote(self.base_url.clone()),
            }),
            Err(e) => bundled_with_reason(format!("{:#}", e)),
        }
    }
}

/// Resolve the bundled catalog without touching the network
pub fn offline() -> Result<ResolvedCatalog> {
    bundled_with_reason("offline mode".to_string())
}

fn bundled_with_reason(reason: String) -> Result<ResolvedCatalog> {
    let catalog = super::bundled().context("Bundled option catalog is invalid")?;
    Ok(ResolvedCatalog {
        catalog,
        origin: CatalogOrigin::Bundled { reason },
    })
}
