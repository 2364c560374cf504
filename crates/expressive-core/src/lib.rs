//! Expressive HTTP errors
//!
//! An [`ExpressiveError`] pairs a status code with a message and can be
//! reported, propagated with `?`, or written to a [`ResponseChannel`] at
//! most once.

#![allow(clippy::must_use_candidate)]

mod channel;
mod error;
mod failure;
mod http_error;
mod kind;
mod message;
pub mod report;

pub use channel::ResponseChannel;
pub use error::{ExpressiveError, MissingChannelError, create_error};
pub use failure::{Failure, guaranteed_expressive};
pub use http_error::HttpError;
pub use kind::ErrorKind;
pub use message::Message;
pub use report::{Printer, StderrPrinter, TracingPrinter};

pub use http::StatusCode;
