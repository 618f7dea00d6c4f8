use std::path::PathBuf;

use thiserror::Error;

use crate::parser::traits::ParseError;

/// Errors that abort an audit before any package is checked
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("There is no composer.json file found at: {}", .0.display())]
    RequirementsManifestNotFound(PathBuf),

    #[error(
        "There is no composer.lock file found at: {}. Please install composer dependencies before running this command",
        .0.display()
    )]
    LockManifestNotFound(PathBuf),

    #[error("{} has no 'require' section", .0.display())]
    MissingRuntimeRequirements(PathBuf),

    #[error("{} has no 'require-dev' section", .0.display())]
    MissingDevRequirements(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}
