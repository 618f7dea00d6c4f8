//! Parser layer
//! - traits.rs: ManifestParser trait definition
//! - types.rs: Manifest types (RequirementsManifest, LockManifest, LockedPackage)
//! - composer_json.rs: composer.json parser
//! - composer_lock.rs: composer.lock parser

pub mod composer_json;
pub mod composer_lock;
pub mod traits;
pub mod types;

pub use composer_json::ComposerJsonParser;
pub use composer_lock::ComposerLockParser;
pub use traits::{ManifestParser, ParseError};
pub use types::{LockManifest, LockedPackage, PLATFORM_REQUIREMENT, RequirementsManifest};
