use axum::Json;
use axum::response::{IntoResponse, Response};
use expressive_config::{BodyFormat, ResponseConfig};
use expressive_core::{ErrorKind, HttpError, Message};
use http::StatusCode;
use serde::Serialize;
use serde_json::Value;

const HIDDEN_MESSAGE: &str = "an internal error occurred";

/// Error status and message attached to a response awaiting final rendering
///
/// Inserted into response extensions so the send-once middleware can
/// re-render with the configured format.
#[derive(Debug, Clone)]
pub struct ErrorPayload {
    pub status: StatusCode,
    pub message: Message,
}

/// JSON envelope used for `format = "json"`
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorDetails,
}

#[derive(Debug, Serialize)]
struct ErrorDetails {
    message: Value,
    r#type: String,
    code: u16,
}

/// Render status and message according to `config`
///
/// In text mode, structured messages are still written as JSON.
pub fn render(status: StatusCode, message: &Message, config: &ResponseConfig) -> Response {
    let mut response = match config.format {
        BodyFormat::Text => match message {
            Message::Structured(value) => (status, Json(value.clone())).into_response(),
            _ => (status, visible_text(message, config)).into_response(),
        },
        BodyFormat::Json => {
            let envelope = ErrorEnvelope {
                error: ErrorDetails {
                    message: match message {
                        Message::Structured(value) => value.clone(),
                        _ => Value::String(visible_text(message, config)),
                    },
                    r#type: ErrorKind::from_status(status)
                        .map_or("http_error", ErrorKind::error_type)
                        .to_owned(),
                    code: status.as_u16(),
                },
            };
            (status, Json(envelope)).into_response()
        }
    };

    response.extensions_mut().insert(ErrorPayload {
        status,
        message: message.clone(),
    });

    response
}

/// Render any [`HttpError`] as a JSON envelope
pub fn http_error_response<E>(error: &E) -> Response
where
    E: HttpError + ?Sized,
{
    let status = error.status_code();
    let envelope = ErrorEnvelope {
        error: ErrorDetails {
            message: Value::String(error.client_message()),
            r#type: error.error_type().to_owned(),
            code: status.as_u16(),
        },
    };

    (status, Json(envelope)).into_response()
}

fn visible_text(message: &Message, config: &ResponseConfig) -> String {
    match message {
        Message::Source(_) if !config.expose_internal_errors => HIDDEN_MESSAGE.to_owned(),
        other => other.to_string(),
    }
}
