use std::fmt::Display;
use std::sync::Arc;

use http::StatusCode;
use thiserror::Error;

use crate::report::{Printer, TracingPrinter};
use crate::{Message, ResponseChannel};

/// Send was attempted with neither a call-site nor a bound response channel
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no response channel available to send error {}", .status.as_u16())]
pub struct MissingChannelError {
    /// Status of the error that could not be sent
    pub status: StatusCode,
}

/// HTTP error that can be reported, propagated, or sent as a response once
///
/// Sending is guarded by a private flag: after the first successful send,
/// later sends are silently ignored. The value is deliberately not `Clone`
/// so that the flag cannot be duplicated.
#[derive(Debug, Error)]
#[error("Error {}: {}", .status.as_u16(), .message)]
pub struct ExpressiveError {
    status: StatusCode,
    message: Message,
    sent: bool,
    channel: Option<Arc<dyn ResponseChannel>>,
}

impl ExpressiveError {
    /// Create an unsent error with no bound channel
    pub fn new(status: StatusCode, message: impl Into<Message>) -> Self {
        Self {
            status,
            message: message.into(),
            sent: false,
            channel: None,
        }
    }

    /// Bind a default response channel for later sends
    #[must_use]
    pub fn with_channel(mut self, channel: Arc<dyn ResponseChannel>) -> Self {
        self.channel = Some(channel);
        self
    }

    /// HTTP status code
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Current message
    pub const fn message(&self) -> &Message {
        &self.message
    }

    /// Replace the message
    pub fn set_message(&mut self, message: impl Into<Message>) {
        self.message = message.into();
    }

    /// Response channel bound at construction, if any
    pub fn channel(&self) -> Option<&Arc<dyn ResponseChannel>> {
        self.channel.as_ref()
    }

    /// Capability marker distinguishing this value from arbitrary errors
    pub const fn is_expressive(&self) -> bool {
        true
    }

    /// Whether this error has already been written to a response
    pub const fn is_sent(&self) -> bool {
        self.sent
    }

    /// Report through the default `tracing` printer
    pub fn report(&self) -> &Self {
        self.report_with(&TracingPrinter::default(), &[])
    }

    /// Report through `printer`, passing `args` after the formatted error
    pub fn report_with<P: Printer + ?Sized>(&self, printer: &P, args: &[&dyn Display]) -> &Self {
        printer.print(&self.to_string(), args);
        self
    }

    /// Send through the bound channel
    ///
    /// # Errors
    ///
    /// Returns [`MissingChannelError`] if unsent and no channel is bound
    pub fn send(&mut self) -> Result<&mut Self, MissingChannelError> {
        self.send_with(None, None)
    }

    /// Send through `channel` instead of the bound one
    pub fn send_to(&mut self, channel: &dyn ResponseChannel) -> &mut Self {
        self.write_once(channel);
        self
    }

    /// Send through the bound channel, replacing the message first
    ///
    /// # Errors
    ///
    /// Returns [`MissingChannelError`] if unsent and no channel is bound
    pub fn send_message(&mut self, message: impl Into<Message>) -> Result<&mut Self, MissingChannelError> {
        self.send_with(None, Some(message.into()))
    }

    /// Write status and message to a response channel at most once
    ///
    /// An override message replaces the current one even when the error was
    /// already sent. The channel argument takes precedence over the bound
    /// channel.
    ///
    /// # Errors
    ///
    /// Returns [`MissingChannelError`] if unsent and neither `channel` nor a
    /// bound channel is available
    pub fn send_with(
        &mut self,
        channel: Option<&dyn ResponseChannel>,
        message: Option<Message>,
    ) -> Result<&mut Self, MissingChannelError> {
        if let Some(message) = message {
            self.message = message;
        }

        if self.sent {
            tracing::trace!(status = self.status.as_u16(), "error already sent, ignoring");
            return Ok(self);
        }

        match channel {
            Some(channel) => self.write_once(channel),
            None => {
                let bound = self
                    .channel
                    .clone()
                    .ok_or(MissingChannelError { status: self.status })?;
                self.write_once(bound.as_ref());
            }
        }

        Ok(self)
    }

    fn write_once(&mut self, target: &dyn ResponseChannel) {
        if self.sent {
            tracing::trace!(status = self.status.as_u16(), "error already sent, ignoring");
            return;
        }

        target.set_status(self.status);
        target.write_body(&self.message);
        self.sent = true;

        tracing::debug!(status = self.status.as_u16(), "sent error response");
    }

    /// Send only when `condition` holds
    ///
    /// # Errors
    ///
    /// Propagates [`MissingChannelError`] from the underlying send
    pub fn send_if(
        &mut self,
        condition: bool,
        channel: Option<&dyn ResponseChannel>,
        message: Option<Message>,
    ) -> Result<&mut Self, MissingChannelError> {
        if condition {
            self.send_with(channel, message)
        } else {
            Ok(self)
        }
    }

    /// Send only when `condition` does not hold
    ///
    /// # Errors
    ///
    /// Propagates [`MissingChannelError`] from the underlying send
    pub fn send_unless(
        &mut self,
        condition: bool,
        channel: Option<&dyn ResponseChannel>,
        message: Option<Message>,
    ) -> Result<&mut Self, MissingChannelError> {
        self.send_if(!condition, channel, message)
    }

    /// Raise this error
    ///
    /// # Errors
    ///
    /// Always returns `Err(self)`
    pub fn throw_error<T>(self) -> Result<T, Self> {
        Err(self)
    }

    /// Raise this error when `condition` holds, otherwise hand it back
    ///
    /// # Errors
    ///
    /// Returns `Err(self)` when `condition` is true
    pub fn throw_if(self, condition: bool) -> Result<Self, Self> {
        if condition { Err(self) } else { Ok(self) }
    }

    /// Raise this error unless `condition` holds
    ///
    /// # Errors
    ///
    /// Returns `Err(self)` when `condition` is false
    pub fn throw_unless(self, condition: bool) -> Result<Self, Self> {
        self.throw_if(!condition)
    }
}

impl Default for ExpressiveError {
    fn default() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, Message::default())
    }
}

/// Build an error with optional parts
///
/// Status defaults to 500 and message to empty text.
pub fn create_error(
    status: Option<StatusCode>,
    message: Option<Message>,
    channel: Option<Arc<dyn ResponseChannel>>,
) -> ExpressiveError {
    let error = ExpressiveError::new(
        status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        message.unwrap_or_default(),
    );

    match channel {
        Some(channel) => error.with_channel(channel),
        None => error,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    #[derive(Debug, Default)]
    struct MockChannel {
        calls: Mutex<Vec<String>>,
    }

    impl MockChannel {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ResponseChannel for MockChannel {
        fn set_status(&self, status: StatusCode) {
            self.calls.lock().unwrap().push(format!("status {}", status.as_u16()));
        }

        fn write_body(&self, message: &Message) {
            self.calls.lock().unwrap().push(format!("body {message}"));
        }
    }

    #[derive(Default)]
    struct RecordingPrinter {
        lines: Mutex<Vec<String>>,
    }

    impl Printer for RecordingPrinter {
        fn print(&self, line: &str, args: &[&dyn Display]) {
            let mut entry = line.to_owned();
            for arg in args {
                entry.push_str(&format!(" | {arg}"));
            }
            self.lines.lock().unwrap().push(entry);
        }
    }

    #[test]
    fn defaults_to_500_with_empty_message() {
        let error = create_error(None, None, None);
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.message().is_empty());
        assert!(!error.is_sent());
        assert!(error.channel().is_none());
        assert_eq!(error.to_string(), "Error 500: ");
    }

    #[test]
    fn formats_text_message() {
        let error = ExpressiveError::new(StatusCode::BAD_REQUEST, "missing field");
        assert_eq!(error.to_string(), "Error 400: missing field");
    }

    #[test]
    fn formats_structured_message_as_json() {
        let error = ExpressiveError::new(StatusCode::UNPROCESSABLE_ENTITY, json!({ "field": "email" }));
        assert_eq!(error.to_string(), r#"Error 422: {"field":"email"}"#);
    }

    #[test]
    fn report_passes_formatted_line_and_args() {
        let printer = RecordingPrinter::default();
        let error = ExpressiveError::new(StatusCode::FORBIDDEN, "nope");

        let returned = error.report_with(&printer, &[&"request-7", &42]);

        assert!(std::ptr::eq(returned, &error));
        assert_eq!(*printer.lines.lock().unwrap(), vec!["Error 403: nope | request-7 | 42"]);
        assert!(!error.is_sent());
    }

    #[test]
    fn report_with_default_printer_returns_self() {
        let error = ExpressiveError::new(StatusCode::GONE, "moved on");
        assert!(std::ptr::eq(error.report(), &error));
    }

    #[test]
    fn send_writes_status_then_body() {
        let channel = MockChannel::default();
        let mut error = ExpressiveError::new(StatusCode::NOT_FOUND, "user missing");

        error.send_to(&channel);

        assert!(error.is_sent());
        assert_eq!(channel.calls(), vec!["status 404", "body user missing"]);
    }

    #[test]
    fn send_to_chains_without_result() {
        let channel = MockChannel::default();
        let mut error = ExpressiveError::new(StatusCode::GONE, "bye");

        assert!(error.send_to(&channel).send_to(&channel).is_sent());
        assert_eq!(channel.calls(), vec!["status 410", "body bye"]);
    }

    #[test]
    fn second_send_is_absorbed() {
        let first = MockChannel::default();
        let second = MockChannel::default();
        let mut error = ExpressiveError::new(StatusCode::CONFLICT, "dup");

        error.send_to(&first);
        error.send_to(&first);
        error.send_with(Some(&second), Some(Message::from("other"))).unwrap();

        assert!(error.is_sent());
        assert_eq!(first.calls(), vec!["status 409", "body dup"]);
        assert!(second.calls().is_empty());
    }

    #[test]
    fn override_replaces_message_even_after_send() {
        let channel = MockChannel::default();
        let mut error = ExpressiveError::new(StatusCode::CONFLICT, "dup");

        error.send_with(Some(&channel), Some(Message::from("first"))).unwrap();
        error.send_with(Some(&channel), Some(Message::from("second"))).unwrap();

        assert_eq!(channel.calls(), vec!["status 409", "body first"]);
        assert_eq!(error.message(), &Message::from("second"));
    }

    #[test]
    fn send_uses_bound_channel() {
        let channel = Arc::new(MockChannel::default());
        let mut error = ExpressiveError::new(StatusCode::UNAUTHORIZED, "login").with_channel(channel.clone());

        error.send().unwrap();

        assert_eq!(channel.calls(), vec!["status 401", "body login"]);
    }

    #[test]
    fn call_site_channel_wins_over_bound() {
        let bound = Arc::new(MockChannel::default());
        let explicit = MockChannel::default();
        let mut error = create_error(Some(StatusCode::BAD_GATEWAY), Some("upstream".into()), Some(bound.clone()));

        error.send_to(&explicit);

        assert!(bound.calls().is_empty());
        assert_eq!(explicit.calls(), vec!["status 502", "body upstream"]);
    }

    #[test]
    fn send_message_overrides_before_writing() {
        let channel = Arc::new(MockChannel::default());
        let mut error = ExpressiveError::new(StatusCode::BAD_REQUEST, "generic").with_channel(channel.clone());

        error.send_message("specific").unwrap();

        assert_eq!(channel.calls(), vec!["status 400", "body specific"]);
    }

    #[test]
    fn send_without_channel_fails() {
        let mut error = ExpressiveError::new(StatusCode::NOT_FOUND, "x");

        let err = error.send().unwrap_err();

        assert_eq!(err, MissingChannelError { status: StatusCode::NOT_FOUND });
        assert_eq!(err.to_string(), "no response channel available to send error 404");
        assert!(!error.is_sent());
    }

    #[test]
    fn send_without_channel_after_send_is_noop() {
        let channel = MockChannel::default();
        let mut error = ExpressiveError::new(StatusCode::NOT_FOUND, "x");

        error.send_to(&channel);

        assert!(error.send().is_ok());
    }

    #[test]
    fn send_if_respects_condition() {
        let channel = MockChannel::default();
        let mut error = ExpressiveError::new(StatusCode::FORBIDDEN, "no");

        error.send_if(false, Some(&channel), None).unwrap();
        assert!(channel.calls().is_empty());
        assert!(!error.is_sent());

        error.send_if(true, Some(&channel), None).unwrap();
        error.send_if(true, Some(&channel), None).unwrap();
        assert_eq!(channel.calls().len(), 2);
        assert!(error.is_sent());
    }

    #[test]
    fn send_unless_is_complement() {
        let channel = MockChannel::default();
        let mut error = ExpressiveError::new(StatusCode::FORBIDDEN, "no");

        error.send_unless(true, Some(&channel), None).unwrap();
        assert!(channel.calls().is_empty());

        error.send_unless(false, Some(&channel), None).unwrap();
        assert_eq!(channel.calls(), vec!["status 403", "body no"]);
    }

    #[test]
    fn send_if_false_without_channel_is_ok() {
        let mut error = ExpressiveError::new(StatusCode::FORBIDDEN, "no");
        assert!(error.send_if(false, None, None).is_ok());
        assert!(error.send_unless(true, None, None).is_ok());
    }

    #[test]
    fn throw_error_always_raises() {
        let result: Result<(), _> = ExpressiveError::new(StatusCode::GONE, "bye").throw_error();
        let error = result.unwrap_err();
        assert_eq!(error.status(), StatusCode::GONE);
        assert!(!error.is_sent());
    }

    #[test]
    fn throw_if_and_unless() {
        let error = ExpressiveError::new(StatusCode::LOCKED, "busy");

        let error = error.throw_if(false).unwrap();
        let error = error.throw_unless(true).unwrap();
        let error = error.throw_if(true).unwrap_err();
        let error = error.throw_unless(false).unwrap_err();

        assert_eq!(error.status(), StatusCode::LOCKED);
        assert_eq!(error.message(), &Message::from("busy"));
    }

    #[test]
    fn thrown_error_can_be_sent_by_outer_handler() {
        fn lookup(found: bool) -> Result<&'static str, ExpressiveError> {
            ExpressiveError::new(StatusCode::NOT_FOUND, "user missing").throw_unless(found)?;
            Ok("user")
        }

        let channel = MockChannel::default();
        let mut error = lookup(false).unwrap_err();
        error.send_to(&channel);

        assert_eq!(lookup(true).unwrap(), "user");
        assert_eq!(channel.calls(), vec!["status 404", "body user missing"]);
    }

    #[test]
    fn is_expressive_marker() {
        assert!(ExpressiveError::default().is_expressive());
    }
}
