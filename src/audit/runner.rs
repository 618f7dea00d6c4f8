//! Audit orchestration: load manifests, fan out reconciliations, fold results

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};
use tracing::{debug, error, info};

use crate::audit::error::AuditError;
use crate::config::AuditConfig;
use crate::parser::traits::ManifestParser;
use crate::parser::types::{LockManifest, LockedPackage, RequirementsManifest};
use crate::parser::{ComposerJsonParser, ComposerLockParser};
use crate::version::checker::{ReconcileOutcome, Reconciliation, reconcile};
use crate::version::platform::PlatformConstraintTracker;
use crate::version::registry::Registry;
use crate::version::types::UpdateFinding;

/// Everything the audit learned, ready for rendering
#[derive(Debug, Default)]
pub struct AuditReport {
    /// Outdated packages in completion order
    pub findings: Vec<UpdateFinding>,
    /// PHP range declared across the checked packages
    pub platform: PlatformConstraintTracker,
    /// Number of packages handed to the reconciler
    pub checked: usize,
    /// Number of packages whose registry lookup failed
    pub failures: usize,
}

/// Resolve the project directory, defaulting to the current directory
pub fn project_dir(location: Option<&Path>) -> Result<PathBuf, AuditError> {
    match location {
        Some(path) => Ok(path.to_path_buf()),
        None => std::env::current_dir().map_err(|source| AuditError::Read {
            path: PathBuf::from("."),
            source,
        }),
    }
}

fn read_manifest<P: ManifestParser>(parser: &P, path: &Path) -> Result<P::Output, AuditError> {
    let content = std::fs::read_to_string(path).map_err(|source| AuditError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parser.parse(&content).map_err(|source| AuditError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and validate both manifests from `dir`
///
/// Both files must exist before either is read, and `composer.json` must
/// declare both a `require` and a `require-dev` section.
pub fn load_manifests(dir: &Path) -> Result<(RequirementsManifest, LockManifest), AuditError> {
    let json_parser = ComposerJsonParser::new();
    let lock_parser = ComposerLockParser::new();

    let json_path = dir.join(json_parser.file_name());
    let lock_path = dir.join(lock_parser.file_name());

    if !json_path.is_file() {
        return Err(AuditError::RequirementsManifestNotFound(json_path));
    }

    if !lock_path.is_file() {
        return Err(AuditError::LockManifestNotFound(lock_path));
    }

    let requirements = read_manifest(&json_parser, &json_path)?;

    if requirements.require.is_none() {
        return Err(AuditError::MissingRuntimeRequirements(json_path));
    }

    if requirements.require_dev.is_none() {
        return Err(AuditError::MissingDevRequirements(json_path));
    }

    let lock = read_manifest(&lock_parser, &lock_path)?;

    Ok((requirements, lock))
}

/// Locked packages that were explicitly requested, in lock order
pub fn packages_to_check(
    requirements: &RequirementsManifest,
    lock: &LockManifest,
) -> Vec<LockedPackage> {
    let requested: HashSet<&str> = requirements.requested_names().collect();

    lock.all_packages()
        .filter(|package| requested.contains(package.name.as_str()))
        .cloned()
        .collect()
}

/// Reconcile all packages with at most `config.concurrency` lookups in flight
///
/// Waits for every reconciliation to settle. Per-package failures are logged
/// and counted; they never abort the run.
pub async fn reconcile_all(
    registry: &dyn Registry,
    packages: &[LockedPackage],
    config: &AuditConfig,
) -> AuditReport {
    let timeout = config.fetch_timeout();

    let reconciliations: Vec<Reconciliation> = stream::iter(packages)
        .map(|package| reconcile(registry, package, timeout))
        .buffer_unordered(config.concurrency.max(1))
        .collect()
        .await;

    let mut report = AuditReport {
        checked: packages.len(),
        ..AuditReport::default()
    };

    for reconciliation in reconciliations {
        if let Some(raw) = &reconciliation.platform_requirement {
            report.platform.observe(raw);
        }

        let Reconciliation {
            package_name,
            locked_version,
            outcome,
            ..
        } = reconciliation;

        match outcome {
            ReconcileOutcome::Outdated(finding) => {
                debug!(
                    "{} is outdated: {} < {}",
                    package_name, finding.current_version_locked, finding.latest_version
                );
                report.findings.push(finding);
            }
            ReconcileOutcome::UpToDate => debug!("{} is up to date", package_name),
            ReconcileOutcome::AheadOfRegistry { locked, latest } => debug!(
                "{} is locked at {} which is ahead of the latest listed release {}",
                package_name, locked, latest
            ),
            ReconcileOutcome::UnreleasedLock => info!(
                "No current lock version of package {} ({})",
                package_name, locked_version
            ),
            ReconcileOutcome::NoPublishedVersions => {
                debug!("No published releases listed for {}", package_name)
            }
            ReconcileOutcome::LookupFailed(e) => {
                report.failures += 1;
                error!(
                    "Failed to fetch versions for {} (locked at {}): {}",
                    package_name, locked_version, e
                );
            }
        }
    }

    info!(
        "Checked {} packages: {} outdated, {} lookup failures",
        report.checked,
        report.findings.len(),
        report.failures
    );

    report
}

/// Run a full audit of the project at `location`
///
/// Manifest problems are returned before the registry is contacted.
pub async fn run(
    location: Option<&Path>,
    config: &AuditConfig,
    registry: &dyn Registry,
) -> Result<AuditReport, AuditError> {
    let dir = project_dir(location)?;
    debug!("Auditing Composer project at {}", dir.display());

    let (requirements, lock) = load_manifests(&dir)?;
    let packages = packages_to_check(&requirements, &lock);
    debug!("{} locked packages requested", packages.len());

    Ok(reconcile_all(registry, &packages, config).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::types::Requirements;
    use crate::version::error::RegistryError;
    use crate::version::registry::MockRegistry;
    use crate::version::types::RegistryVersionSet;
    use semver::Version;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;

    fn requirements(require: &[&str], require_dev: &[&str]) -> RequirementsManifest {
        let section = |names: &[&str]| -> Requirements {
            names
                .iter()
                .map(|name| (name.to_string(), "*".to_string()))
                .collect()
        };
        RequirementsManifest {
            require: Some(section(require)),
            require_dev: Some(section(require_dev)),
        }
    }

    fn package(name: &str, version: &str, php: Option<&str>) -> LockedPackage {
        let mut package = LockedPackage::new(name, version);
        if let Some(php) = php {
            package.require.insert("php".to_string(), php.to_string());
        }
        package
    }

    fn write_project(composer_json: Option<&str>, composer_lock: Option<&str>) -> TempDir {
        let dir = TempDir::new().unwrap();
        if let Some(content) = composer_json {
            std::fs::write(dir.path().join("composer.json"), content).unwrap();
        }
        if let Some(content) = composer_lock {
            std::fs::write(dir.path().join("composer.lock"), content).unwrap();
        }
        dir
    }

    #[test]
    fn packages_to_check_keeps_requested_packages_in_lock_order() {
        let lock = LockManifest {
            packages: vec![
                package("psr/log", "3.0.0", None),
                package("monolog/monolog", "2.9.1", None),
            ],
            packages_dev: vec![package("phpunit/phpunit", "9.6.13", None)],
        };

        let selected = packages_to_check(
            &requirements(&["php", "monolog/monolog"], &["phpunit/phpunit"]),
            &lock,
        );

        let names: Vec<&str> = selected.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["monolog/monolog", "phpunit/phpunit"]);
    }

    #[test]
    fn load_manifests_fails_when_composer_json_is_missing() {
        let dir = write_project(None, Some(r#"{"packages": []}"#));

        let result = load_manifests(dir.path());

        assert!(matches!(
            result,
            Err(AuditError::RequirementsManifestNotFound(path)) if path.ends_with("composer.json")
        ));
    }

    #[test]
    fn load_manifests_fails_when_composer_lock_is_missing() {
        let dir = write_project(Some(r#"{"require": {}, "require-dev": {}}"#), None);

        let result = load_manifests(dir.path());

        assert!(matches!(
            result,
            Err(AuditError::LockManifestNotFound(path)) if path.ends_with("composer.lock")
        ));
    }

    #[test]
    fn load_manifests_requires_runtime_section() {
        let dir = write_project(
            Some(r#"{"require-dev": {"phpunit/phpunit": "^9"}}"#),
            Some(r#"{"packages": []}"#),
        );

        let result = load_manifests(dir.path());

        assert!(matches!(
            result,
            Err(AuditError::MissingRuntimeRequirements(_))
        ));
    }

    #[test]
    fn load_manifests_requires_dev_section() {
        let dir = write_project(
            Some(r#"{"require": {"monolog/monolog": "^2"}}"#),
            Some(r#"{"packages": []}"#),
        );

        let result = load_manifests(dir.path());

        assert!(matches!(result, Err(AuditError::MissingDevRequirements(_))));
    }

    #[test]
    fn load_manifests_accepts_empty_array_dev_section() {
        let dir = write_project(
            Some(r#"{"require": {"a/a": "^1"}, "require-dev": []}"#),
            Some(r#"{"packages": []}"#),
        );

        let (requirements, _) = load_manifests(dir.path()).unwrap();

        assert_eq!(requirements.require_dev, Some(Requirements::new()));
        assert_eq!(requirements.requested_names().collect::<Vec<_>>(), vec!["a/a"]);
    }

    #[test]
    fn load_manifests_reports_parse_errors_with_path() {
        let dir = write_project(Some("{broken"), Some(r#"{"packages": []}"#));

        let result = load_manifests(dir.path());

        assert!(matches!(
            result,
            Err(AuditError::Parse { path, .. }) if path.ends_with("composer.json")
        ));
    }

    #[tokio::test]
    async fn reconcile_all_collects_findings_and_folds_platform_bounds() {
        let mut registry = MockRegistry::new();
        registry
            .expect_fetch_all_versions()
            .withf(|name| name == "acme/old")
            .returning(|_| Ok(RegistryVersionSet::from_identifiers(["1.0.0", "1.4.2"])));
        registry
            .expect_fetch_all_versions()
            .withf(|name| name == "acme/current")
            .returning(|_| Ok(RegistryVersionSet::from_identifiers(["2.0.0"])));
        registry
            .expect_fetch_all_versions()
            .withf(|name| name == "acme/broken")
            .returning(|name| Err(RegistryError::InvalidResponse(name.to_string())));

        let packages = vec![
            package("acme/old", "1.0.0", Some(">=7.2")),
            package("acme/current", "v2.0.0", Some("^8.1")),
            package("acme/broken", "3.0.0", Some(">=7.4")),
            package("acme/branch", "dev-main", Some(">=5.3")),
        ];

        let report = reconcile_all(&registry, &packages, &AuditConfig::default()).await;

        assert_eq!(report.checked, 4);
        assert_eq!(report.failures, 1);
        assert_eq!(
            report.findings,
            vec![UpdateFinding {
                package_name: "acme/old".to_string(),
                current_version_locked: Version::new(1, 0, 0),
                latest_version: Version::new(1, 4, 2),
            }]
        );
        assert_eq!(report.platform.min(), Some(&Version::new(7, 2, 0)));
        assert_eq!(report.platform.max(), Some(&Version::new(8, 1, 0)));
    }

    /// Registry that records how many lookups overlap
    #[derive(Default)]
    struct CountingRegistry {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Registry for CountingRegistry {
        async fn fetch_all_versions(
            &self,
            _package_name: &str,
        ) -> Result<RegistryVersionSet, RegistryError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            self.calls.fetch_add(1, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(20)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(RegistryVersionSet::from_identifiers(["1.0.0"]))
        }
    }

    #[tokio::test]
    async fn reconcile_all_runs_lookups_concurrently_up_to_the_limit() {
        let registry = CountingRegistry::default();
        let packages: Vec<LockedPackage> = (0..6)
            .map(|i| package(&format!("acme/pkg-{}", i), "0.9.0", None))
            .collect();
        let config = AuditConfig {
            concurrency: 2,
            ..AuditConfig::default()
        };

        let report = reconcile_all(&registry, &packages, &config).await;

        assert_eq!(registry.peak.load(Ordering::SeqCst), 2);
        assert_eq!(registry.calls.load(Ordering::SeqCst), 6);
        assert_eq!(report.checked, 6);
        assert_eq!(report.findings.len(), 6);

        let mut names: Vec<&str> = report
            .findings
            .iter()
            .map(|f| f.package_name.as_str())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "acme/pkg-0",
                "acme/pkg-1",
                "acme/pkg-2",
                "acme/pkg-3",
                "acme/pkg-4",
                "acme/pkg-5"
            ]
        );
    }

    #[tokio::test]
    async fn reconcile_all_handles_empty_package_list() {
        let mut registry = MockRegistry::new();
        registry.expect_fetch_all_versions().times(0);

        let report = reconcile_all(&registry, &[], &AuditConfig::default()).await;

        assert!(report.findings.is_empty());
        assert!(!report.platform.is_observed());
        assert_eq!(report.checked, 0);
    }

    #[tokio::test]
    async fn run_aborts_before_registry_when_lock_is_missing() {
        let dir = write_project(
            Some(r#"{"require": {"acme/a": "^1"}, "require-dev": {"acme/b": "^1"}}"#),
            None,
        );
        let mut registry = MockRegistry::new();
        registry.expect_fetch_all_versions().times(0);

        let result = run(Some(dir.path()), &AuditConfig::default(), &registry).await;

        assert!(matches!(result, Err(AuditError::LockManifestNotFound(_))));
    }
}
