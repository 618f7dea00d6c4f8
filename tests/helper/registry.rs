//! Registry test utilities

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use composer_outdated::version::error::RegistryError;
use composer_outdated::version::registry::Registry;
use composer_outdated::version::types::RegistryVersionSet;

/// Mock registry for testing
#[derive(Default)]
pub struct MockRegistry {
    versions: HashMap<String, Vec<String>>,
    requested: Mutex<Vec<String>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_versions(mut self, package: &str, versions: Vec<&str>) -> Self {
        self.versions.insert(
            package.to_string(),
            versions.into_iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    /// Package names looked up so far, in request order
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Registry for MockRegistry {
    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<RegistryVersionSet, RegistryError> {
        self.requested.lock().unwrap().push(package_name.to_string());

        match self.versions.get(package_name) {
            Some(versions) => Ok(RegistryVersionSet::from_identifiers(versions.clone())),
            None => Err(RegistryError::NotFound(package_name.to_string())),
        }
    }
}
