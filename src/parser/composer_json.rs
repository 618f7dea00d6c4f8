//! composer.json parser

use crate::config::REQUIREMENTS_MANIFEST;
use crate::parser::traits::{ManifestParser, ParseError};
use crate::parser::types::RequirementsManifest;

/// Parser for composer.json files
pub struct ComposerJsonParser;

impl ComposerJsonParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ComposerJsonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestParser for ComposerJsonParser {
    type Output = RequirementsManifest;

    fn file_name(&self) -> &'static str {
        REQUIREMENTS_MANIFEST
    }

    fn parse(&self, content: &str) -> Result<RequirementsManifest, ParseError> {
        // Serde accepts a sequence for a struct whose fields all default
        let trimmed = content.trim_start();
        if !trimmed.is_empty() && !trimmed.starts_with('{') {
            return Err(ParseError::ParseFailed(
                "composer.json root must be an object".to_string(),
            ));
        }

        // Deserialize straight from the text so requirement order survives
        Ok(serde_json::from_str(content)?)
    }
}
