#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod report;
pub mod response;

use serde::Deserialize;

pub use report::*;
pub use response::*;

/// Top-level configuration for error rendering and reporting
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// How errors are written into HTTP responses
    #[serde(default)]
    pub response: ResponseConfig,
    /// How errors are reported to diagnostics
    #[serde(default)]
    pub report: ReportConfig,
}
