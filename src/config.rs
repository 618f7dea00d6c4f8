use serde::Deserialize;
use tracing::warn;

// =============================================================================
// Manifest file names
// =============================================================================

/// Requirements manifest looked up in the project directory
pub const REQUIREMENTS_MANIFEST: &str = "composer.json";

/// Lock manifest looked up in the project directory
pub const LOCK_MANIFEST: &str = "composer.lock";

// =============================================================================
// Registry and fetch constants
// =============================================================================

/// Default base URL for the Packagist metadata API
pub const DEFAULT_REGISTRY_URL: &str = "https://repo.packagist.org";

/// Timeout for a single registry lookup in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Maximum number of registry lookups in flight at once
pub const DEFAULT_CONCURRENCY: usize = 8;

const ENV_REGISTRY_URL: &str = "COMPOSER_OUTDATED_REGISTRY_URL";
const ENV_TIMEOUT_MS: &str = "COMPOSER_OUTDATED_TIMEOUT_MS";
const ENV_CONCURRENCY: &str = "COMPOSER_OUTDATED_CONCURRENCY";
const ENV_LOG_FORMAT: &str = "COMPOSER_OUTDATED_LOG_FORMAT";

/// Output format of diagnostic logs written to stderr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    /// Parses `compact` or `json`, ignoring case
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(LogFormat::Compact),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }

    /// Reads the format from `COMPOSER_OUTDATED_LOG_FORMAT`, defaulting to compact
    pub fn from_env() -> Self {
        std::env::var(ENV_LOG_FORMAT)
            .ok()
            .and_then(|raw| Self::parse(&raw))
            .unwrap_or_default()
    }
}

/// Runtime configuration for an audit run
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AuditConfig {
    /// Base URL of the Packagist-compatible registry
    pub registry_url: String,
    /// Per-lookup timeout in milliseconds
    pub fetch_timeout_ms: u64,
    /// Upper bound on concurrent registry lookups
    pub concurrency: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl AuditConfig {
    /// Builds the configuration from `COMPOSER_OUTDATED_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults; unparseable ones are reported
    /// and ignored.
    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_REGISTRY_URL).filter(|u| !u.trim().is_empty()) {
            config.registry_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.fetch_timeout_ms = ms,
                _ => warn!("Ignoring invalid {}={:?}", ENV_TIMEOUT_MS, raw),
            }
        }

        if let Some(raw) = lookup(ENV_CONCURRENCY) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.concurrency = n,
                _ => warn!("Ignoring invalid {}={:?}", ENV_CONCURRENCY, raw),
            }
        }

        config
    }

    pub fn fetch_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.fetch_timeout_ms)
    }
}
