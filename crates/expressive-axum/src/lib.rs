//! axum integration for expressive errors
//!
//! [`with_send_once`] gives every request a [`ResponseSlot`] that handlers
//! can bind errors to, and [`ErrorResponse`] lets handlers return any
//! failure with `?`.

#![allow(clippy::must_use_candidate)]

mod middleware;
mod render;
mod response;
mod slot;

pub use middleware::{ErrorLayerState, send_once_middleware, with_send_once};
pub use render::{ErrorPayload, http_error_response, render};
pub use response::{AlreadySent, ErrorResponse, Result};
pub use slot::ResponseSlot;
