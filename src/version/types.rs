//! Common types shared by registries and the reconciler

use indexmap::IndexMap;
use semver::Version;

/// Published versions of one package, keyed by the raw version identifier
/// as listed by the registry. Values are opaque metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistryVersionSet {
    pub versions: IndexMap<String, serde_json::Value>,
}

impl RegistryVersionSet {
    pub fn new(versions: IndexMap<String, serde_json::Value>) -> Self {
        Self { versions }
    }

    /// Builds a set from bare identifiers with empty metadata
    pub fn from_identifiers<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            versions: identifiers
                .into_iter()
                .map(|id| (id.into(), serde_json::Value::Object(Default::default())))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }
}

/// A locked package that is older than the latest published release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateFinding {
    pub package_name: String,
    pub current_version_locked: Version,
    pub latest_version: Version,
}
