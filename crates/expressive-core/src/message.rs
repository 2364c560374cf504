use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Payload carried by an expressive error and written as the response body
#[derive(Debug, Clone)]
pub enum Message {
    /// Plain text, written verbatim
    Text(String),
    /// Structured data, serialized as JSON when stringified
    Structured(Value),
    /// A foreign error wrapped during normalization
    Source(Arc<anyhow::Error>),
}

impl Message {
    /// Text content, if this is a text message
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Wrapped foreign error, if any
    pub fn as_source(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Source(source) => Some(source),
            _ => None,
        }
    }

    /// Whether the message is empty text
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Structured(value) => write!(f, "{value}"),
            Self::Source(source) => write!(f, "{source:#}"),
        }
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Structured(a), Self::Structured(b)) => a == b,
            (Self::Source(a), Self::Source(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq<str> for Message {
    fn eq(&self, other: &str) -> bool {
        self.as_text() == Some(other)
    }
}

impl PartialEq<&str> for Message {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

impl From<anyhow::Error> for Message {
    fn from(error: anyhow::Error) -> Self {
        Self::Source(Arc::new(error))
    }
}
