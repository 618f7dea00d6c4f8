//! Temporary Composer project fixtures

use tempfile::TempDir;

/// Create a project directory holding the given manifests
pub fn write_project(composer_json: Option<&str>, composer_lock: Option<&str>) -> TempDir {
    let dir = TempDir::new().unwrap();
    if let Some(content) = composer_json {
        std::fs::write(dir.path().join("composer.json"), content).unwrap();
    }
    if let Some(content) = composer_lock {
        std::fs::write(dir.path().join("composer.lock"), content).unwrap();
    }
    dir
}

/// composer.json requiring `acme/runtime` and `acme/tooling` (dev)
pub const COMPOSER_JSON: &str = r#"{
    "name": "acme/app",
    "require": {
        "php": "^8.1",
        "acme/runtime": "^1.0"
    },
    "require-dev": {
        "acme/tooling": "^2.0"
    }
}"#;

/// composer.lock with an outdated runtime package, a current dev package and
/// a transitive dependency that was never requested
pub const COMPOSER_LOCK: &str = r#"{
    "packages": [
        {
            "name": "acme/runtime",
            "version": "v1.2.0",
            "require": {"php": ">=7.4", "acme/transitive": "^3.0"}
        },
        {
            "name": "acme/transitive",
            "version": "3.0.0",
            "require": {"php": ">=5.3"}
        }
    ],
    "packages-dev": [
        {
            "name": "acme/tooling",
            "version": "2.0.0",
            "require": {"php": "^8.2"}
        }
    ]
}"#;
