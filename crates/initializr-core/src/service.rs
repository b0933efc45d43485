//! Initializr service location and HTTP plumbing shared by the fetchers

use crate::product::ProductConfig;
use anyhow::{Context, Result};
use url::Url;

/// Resolve the service root URL: explicit override, then env var, then default
pub fn service_url<C: ProductConfig>(config: &C, explicit: Option<&str>) -> Result<Url> {
    let url_str = match explicit {
        Some(url) => url.to_string(),
        None => std::env::var(config.service_url_env())
            .unwrap_or_else(|_| config.default_service_url().to_string()),
    };
    Url::parse(&url_str).with_context(|| format!("Invalid service URL: {}", url_str))
}

/// Build the HTTP client used for every request to the service
pub fn http_client(user_agent: &str) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Build a URL by appending a path segment, preserving query parameters
pub fn build_url(base: &Url, path_segment: &str) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", base))?
        .pop_if_empty()
        .push(path_segment);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::testing::TestConfig;

    #[test]
    fn test_explicit_url_wins() {
        let url = service_url(&TestConfig, Some("http://localhost:8080")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(service_url(&TestConfig, Some("not a url")).is_err());
    }

    #[test]
    fn test_build_url_appends_segment() {
        let base = Url::parse("https://start.spring.io").unwrap();
        let url = build_url(&base, "starter.zip").unwrap();
        assert_eq!(url.as_str(), "https://start.spring.io/starter.zip");
    }

    #[test]
    fn test_build_url_keeps_base_path() {
        let base = Url::parse("http://proxy.local/initializr/").unwrap();
        let url = build_url(&base, "pom.xml").unwrap();
        assert_eq!(url.as_str(), "http://proxy.local/initializr/pom.xml");
    }
}
