use serde::Deserialize;

/// Severity used by the default report printer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportLevel {
    Trace,
    Debug,
    Info,
    Warn,
    #[default]
    Error,
}

/// Diagnostic reporting configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Level at which `report()` emits its event
    #[serde(default)]
    pub level: ReportLevel,
}
