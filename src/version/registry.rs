//! Registry trait for fetching package versions

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;
use crate::version::types::RegistryVersionSet;

/// Trait for fetching package versions from a registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Fetches all published versions for a package from the registry
    ///
    /// # Arguments
    /// * `package_name` - The Composer package name (e.g., "monolog/monolog")
    ///
    /// # Returns
    /// * `Ok(RegistryVersionSet)` - Raw version identifiers in registry order
    /// * `Err(RegistryError)` - If the fetch fails
    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<RegistryVersionSet, RegistryError>;
}
