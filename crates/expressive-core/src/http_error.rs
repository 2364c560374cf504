use http::StatusCode;

use crate::ExpressiveError;

/// Errors that can be converted to HTTP responses
///
/// Framework adapters render any implementor without knowing its
/// concrete type.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `not_found`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

impl HttpError for ExpressiveError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_type(&self) -> &str {
        self.kind().map_or("http_error", crate::ErrorKind::error_type)
    }

    fn client_message(&self) -> String {
        match self.message().as_source() {
            Some(_) => "an internal error occurred".to_owned(),
            None => self.message().to_string(),
        }
    }
}
