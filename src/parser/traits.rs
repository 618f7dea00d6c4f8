//! Manifest parser trait definition

/// Trait for parsing a Composer manifest file
pub trait ManifestParser {
    /// Structured form produced by this parser
    type Output;

    /// File name this parser reads inside a project directory
    fn file_name(&self) -> &'static str;

    /// Parse the content into its structured form
    fn parse(&self, content: &str) -> Result<Self::Output, ParseError>;
}

/// Error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The content is not valid JSON
    #[error("Invalid syntax: {0}")]
    InvalidSyntax(serde_json::Error),

    /// The JSON is valid but does not have the expected shape
    #[error("Failed to parse file: {0}")]
    ParseFailed(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            serde_json::error::Category::Data => ParseError::ParseFailed(e.to_string()),
            _ => ParseError::InvalidSyntax(e),
        }
    }
}
