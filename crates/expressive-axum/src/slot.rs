use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::FromRequestParts;
use expressive_core::{Message, ResponseChannel};
use http::StatusCode;
use http::request::Parts;

#[derive(Debug, Default)]
struct Written {
    status: Option<StatusCode>,
    body: Option<Message>,
}

/// Response channel backed by shared memory
///
/// Records the first status and body written to it. Clones share the same
/// storage, so a handler can bind a clone to an error while the middleware
/// keeps another to build the final response.
#[derive(Debug, Clone, Default)]
pub struct ResponseSlot {
    written: Arc<Mutex<Written>>,
}

impl ResponseSlot {
    /// Empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Shareable handle for binding to an error
    pub fn channel(&self) -> Arc<dyn ResponseChannel> {
        Arc::new(self.clone())
    }

    /// Whether a body has been written
    pub fn is_filled(&self) -> bool {
        self.lock().body.is_some()
    }

    /// Remove the written status and body, leaving the slot empty
    ///
    /// A body written without a status is reported as `200 OK`.
    pub fn take(&self) -> Option<(StatusCode, Message)> {
        let mut written = self.lock();
        let body = written.body.take()?;
        let status = written.status.take().unwrap_or(StatusCode::OK);
        Some((status, body))
    }

    fn lock(&self) -> MutexGuard<'_, Written> {
        self.written.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ResponseChannel for ResponseSlot {
    fn set_status(&self, status: StatusCode) {
        let mut written = self.lock();
        // Status is frozen once a body is committed
        if written.body.is_none() {
            written.status = Some(status);
        }
    }

    fn write_body(&self, message: &Message) {
        let mut written = self.lock();
        if written.body.is_some() {
            tracing::trace!("response slot already written, dropping body");
            return;
        }
        written.body = Some(message.clone());
    }
}

impl<S> FromRequestParts<S> for ResponseSlot
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "response slot missing: send-once middleware is not installed",
        ))
    }
}
