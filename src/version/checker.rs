//! Reconciles one locked package against its published versions

use std::time::Duration;

use indexmap::IndexMap;
use semver::Version;
use tracing::debug;

use crate::parser::types::LockedPackage;
use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::semver::{
    CompareResult, compare_to_latest, compare_versions, is_unreleased, normalize,
};
use crate::version::types::{RegistryVersionSet, UpdateFinding};

/// Outcome of reconciling a single locked package
#[derive(Debug)]
pub enum ReconcileOutcome {
    /// A newer release than the locked one exists
    Outdated(UpdateFinding),
    /// Locked version equals the latest release
    UpToDate,
    /// Locked version is newer than every listed release (stale listing)
    AheadOfRegistry { locked: Version, latest: Version },
    /// Locked to a branch alias or other non-release version
    UnreleasedLock,
    /// The registry listed no usable release
    NoPublishedVersions,
    /// The registry lookup failed
    LookupFailed(RegistryError),
}

/// Result of reconciling one package, including its PHP requirement
#[derive(Debug)]
pub struct Reconciliation {
    pub package_name: String,
    pub locked_version: String,
    /// Raw PHP constraint declared by the package, if it was inspected
    pub platform_requirement: Option<String>,
    pub outcome: ReconcileOutcome,
}

impl Reconciliation {
    pub fn finding(&self) -> Option<&UpdateFinding> {
        match &self.outcome {
            ReconcileOutcome::Outdated(finding) => Some(finding),
            _ => None,
        }
    }
}

/// Normalizes registry identifiers, dropping branch aliases and non-versions.
///
/// Identifiers that normalize to the same canonical version collapse into one
/// entry; the last one seen keeps its metadata. The result is sorted ascending.
pub fn normalize_registry_versions(
    versions: &RegistryVersionSet,
) -> IndexMap<Version, &serde_json::Value> {
    let mut normalized: IndexMap<Version, &serde_json::Value> = versions
        .versions
        .iter()
        .filter(|(raw, _)| !is_unreleased(raw))
        .filter_map(|(raw, metadata)| normalize(raw).map(|version| (version, metadata)))
        .collect();

    normalized.sort_by(|a, _, b, _| compare_versions(a, b));
    normalized
}

/// Latest published release in the set, or `None` if nothing usable is listed
pub fn latest_published(versions: &RegistryVersionSet) -> Option<Version> {
    normalize_registry_versions(versions)
        .last()
        .map(|(version, _)| version.clone())
}

/// Decide whether `locked` trails the latest release in `versions`
pub fn check_package(
    package_name: &str,
    locked: &Version,
    versions: &RegistryVersionSet,
) -> ReconcileOutcome {
    let Some(latest) = latest_published(versions) else {
        return ReconcileOutcome::NoPublishedVersions;
    };

    match compare_to_latest(locked, &latest) {
        CompareResult::Outdated => ReconcileOutcome::Outdated(UpdateFinding {
            package_name: package_name.to_string(),
            current_version_locked: locked.clone(),
            latest_version: latest,
        }),
        CompareResult::Latest => ReconcileOutcome::UpToDate,
        CompareResult::Newer => ReconcileOutcome::AheadOfRegistry {
            locked: locked.clone(),
            latest,
        },
    }
}

/// Reconcile one locked package against the registry
///
/// Packages locked to a branch alias are skipped before the registry is
/// contacted. Lookup failures and timeouts are returned as
/// [`ReconcileOutcome::LookupFailed`] and never propagated.
pub async fn reconcile(
    registry: &dyn Registry,
    package: &LockedPackage,
    timeout: Duration,
) -> Reconciliation {
    let mut reconciliation = Reconciliation {
        package_name: package.name.clone(),
        locked_version: package.version.clone(),
        platform_requirement: None,
        outcome: ReconcileOutcome::UnreleasedLock,
    };

    let Some(locked) = normalize(&package.version) else {
        return reconciliation;
    };

    reconciliation.platform_requirement = package.platform_requirement();

    debug!("Fetching versions for {}", package.name);
    let fetched = tokio::time::timeout(timeout, registry.fetch_all_versions(&package.name))
        .await
        .unwrap_or_else(|_| {
            let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            Err(RegistryError::Timeout(millis))
        });

    reconciliation.outcome = match fetched {
        Ok(versions) => {
            debug!(
                "Registry listed {} versions for {}",
                versions.len(),
                package.name
            );
            check_package(&package.name, &locked, &versions)
        }
        Err(e) => ReconcileOutcome::LookupFailed(e),
    };

    reconciliation
}
