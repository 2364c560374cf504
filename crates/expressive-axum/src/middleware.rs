use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use expressive_config::Config;
use expressive_core::{ExpressiveError, TracingPrinter};

use crate::ResponseSlot;
use crate::render::{ErrorPayload, render};
use crate::response::AlreadySent;

/// Shared state for the send-once middleware
#[derive(Debug, Clone, Default)]
pub struct ErrorLayerState {
    config: Arc<Config>,
}

impl ErrorLayerState {
    /// State rendering and reporting with `config`
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Guarantee at most one error response per request
///
/// Installs a fresh [`ResponseSlot`] in the request extensions. If a handler
/// sends an error through it, that error becomes the response regardless of
/// what the handler returned. Error responses produced by `ErrorResponse`
/// are re-rendered in the configured format and reported.
pub async fn send_once_middleware(State(state): State<ErrorLayerState>, mut request: Request, next: Next) -> Response {
    let slot = ResponseSlot::new();
    request.extensions_mut().insert(slot.clone());

    let method = request.method().clone();
    let uri = request.uri().clone();

    let mut response = next.run(request).await;

    let (status, message) = if let Some(written) = slot.take() {
        if response.extensions().get::<AlreadySent>().is_none() {
            tracing::debug!(
                handler_status = response.status().as_u16(),
                "discarding handler response in favour of sent error"
            );
        }
        written
    } else if let Some(payload) = response.extensions_mut().remove::<ErrorPayload>() {
        (payload.status, payload.message)
    } else {
        return response;
    };

    let printer = TracingPrinter::from_config(&state.config.report);
    ExpressiveError::new(status, message.clone()).report_with(&printer, &[&method, &uri]);

    render(status, &message, &state.config.response)
}

/// Wrap `router` with [`send_once_middleware`]
pub fn with_send_once<S>(router: Router<S>, config: Config) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(axum::middleware::from_fn_with_state(
        ErrorLayerState::new(config),
        send_once_middleware,
    ))
}
