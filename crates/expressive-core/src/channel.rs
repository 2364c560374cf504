use std::fmt::Debug;

use http::StatusCode;

use crate::Message;

/// Minimal capability an HTTP response target must expose
///
/// Implementations are shared between an error and the host framework, so
/// both methods take `&self` and rely on interior mutability.
pub trait ResponseChannel: Debug + Send + Sync {
    /// Set the response status
    fn set_status(&self, status: StatusCode);

    /// Write the response body
    fn write_body(&self, message: &Message);
}
