use serde::Deserialize;

/// Body encoding used when an error is rendered as a response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFormat {
    /// Message written verbatim as `text/plain`
    #[default]
    Text,
    /// `{"error": {"message", "type", "code"}}` envelope
    Json,
}

/// Response rendering configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseConfig {
    /// Body encoding
    #[serde(default)]
    pub format: BodyFormat,
    /// Write wrapped foreign errors to the client instead of a generic message
    #[serde(default)]
    pub expose_internal_errors: bool,
}
