use axum::response::{IntoResponse, Response};
use expressive_config::ResponseConfig;
use expressive_core::{ExpressiveError, Failure, guaranteed_expressive};

use crate::render::render;

/// Marker extension on responses for errors that were already sent elsewhere
#[derive(Debug, Clone, Copy)]
pub struct AlreadySent;

/// Handler error type: any failure, rendered as an expressive error
///
/// Conversion normalizes through [`guaranteed_expressive`], so handlers can
/// use `?` on expressive and foreign errors alike.
#[derive(Debug)]
pub struct ErrorResponse(ExpressiveError);

impl ErrorResponse {
    /// Wrap an `anyhow` error, recovering an expressive error inside it
    pub fn from_anyhow(error: anyhow::Error) -> Self {
        Self(guaranteed_expressive(Failure::from_anyhow(error)))
    }

    /// Underlying expressive error
    pub const fn error(&self) -> &ExpressiveError {
        &self.0
    }

    /// Unwrap into the expressive error
    pub fn into_inner(self) -> ExpressiveError {
        self.0
    }
}

impl<E> From<E> for ErrorResponse
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self(guaranteed_expressive(error))
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let error = self.0;

        if error.is_sent() {
            tracing::trace!(status = error.status().as_u16(), "error already sent, returning bare status");
            let mut response = error.status().into_response();
            response.extensions_mut().insert(AlreadySent);
            return response;
        }

        render(error.status(), error.message(), &ResponseConfig::default())
    }
}

/// Handler result type
pub type Result<T, E = ErrorResponse> = std::result::Result<T, E>;
