//! composer.lock parser

use crate::config::LOCK_MANIFEST;
use crate::parser::traits::{ManifestParser, ParseError};
use crate::parser::types::LockManifest;

/// Parser for composer.lock files
pub struct ComposerLockParser;

impl ComposerLockParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ComposerLockParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestParser for ComposerLockParser {
    type Output = LockManifest;

    fn file_name(&self) -> &'static str {
        LOCK_MANIFEST
    }

    fn parse(&self, content: &str) -> Result<LockManifest, ParseError> {
        Ok(serde_json::from_str(content)?)
    }
}
