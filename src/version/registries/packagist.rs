//! Packagist metadata API implementation

use std::time::Duration;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::types::RegistryVersionSet;

/// Response from `/p/{vendor}/{package}.json`
#[derive(Debug, Deserialize)]
struct PackagistResponse {
    packages: IndexMap<String, IndexMap<String, serde_json::Value>>,
}

/// Registry implementation for the Packagist metadata API
pub struct PackagistRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl PackagistRegistry {
    /// Creates a new PackagistRegistry with a custom base URL and request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("composer-outdated/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn retry_after_secs(response: &reqwest::Response) -> Option<u64> {
        response
            .headers()
            .get(reqwest::header::RETRY_AFTER)?
            .to_str()
            .ok()?
            .trim()
            .parse()
            .ok()
    }
}

#[async_trait::async_trait]
impl Registry for PackagistRegistry {
    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<RegistryVersionSet, RegistryError> {
        let url = format!("{}/p/{}.json", self.base_url, package_name);
        debug!("Fetching Packagist package: {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RegistryError::RateLimited {
                retry_after_secs: Self::retry_after_secs(&response),
            });
        }

        if !status.is_success() {
            warn!("Packagist returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let mut body: PackagistResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse Packagist response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        let versions = body.packages.swap_remove(package_name).ok_or_else(|| {
            RegistryError::InvalidResponse(format!(
                "Response does not list package {}",
                package_name
            ))
        })?;

        Ok(RegistryVersionSet::new(versions))
    }
}
