use std::fmt;

use crate::{ErrorKind, ExpressiveError, Message};

/// Any failure reaching a central handler
///
/// Separates errors that already carry the expressive capability from
/// arbitrary errors raised by surrounding code.
#[derive(Debug)]
pub enum Failure {
    /// Already an expressive error
    Expressive(ExpressiveError),
    /// Anything else
    Foreign(anyhow::Error),
}

impl Failure {
    /// Classify an `anyhow` error, recovering a wrapped expressive error
    pub fn from_anyhow(error: anyhow::Error) -> Self {
        match error.downcast::<ExpressiveError>() {
            Ok(expressive) => Self::Expressive(expressive),
            Err(foreign) => Self::Foreign(foreign),
        }
    }

    /// Whether this failure carries the expressive capability
    pub const fn is_expressive(&self) -> bool {
        matches!(self, Self::Expressive(_))
    }
}

impl<E> From<E> for Failure
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::from_anyhow(anyhow::Error::new(error))
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expressive(error) => fmt::Display::fmt(error, f),
            Self::Foreign(error) => write!(f, "{error:#}"),
        }
    }
}

impl From<Failure> for ExpressiveError {
    fn from(failure: Failure) -> Self {
        guaranteed_expressive(failure)
    }
}

/// Normalize any failure into an expressive error
///
/// Expressive errors are returned unchanged, including their send state.
/// Anything else becomes a `500 Internal Server Error` carrying the
/// original error as its message.
pub fn guaranteed_expressive(candidate: impl Into<Failure>) -> ExpressiveError {
    match candidate.into() {
        Failure::Expressive(error) => error,
        Failure::Foreign(error) => {
            tracing::debug!(error = ?error, "wrapping foreign error as internal server error");
            ErrorKind::InternalServerError.error(Message::from(error))
        }
    }
}
