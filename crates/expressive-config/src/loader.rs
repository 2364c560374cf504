use std::path::Path;

use crate::{BodyFormat, Config};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Environment placeholders are expanded before parsing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot be
    /// resolved, or the TOML is malformed
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config = Self::from_toml(&raw)?;

        tracing::debug!(config_path = %path.display(), "loaded error configuration");

        Ok(config)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns an error if a placeholder cannot be resolved or the TOML is
    /// malformed
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate();

        Ok(config)
    }

    /// Log a warning for each accepted but risky setting
    ///
    /// Every combination of settings is valid, so this never rejects a
    /// configuration.
    pub fn validate(&self) {
        for warning in self.warnings() {
            tracing::warn!("{warning}");
        }
    }

    /// Accepted settings that are likely mistakes
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();

        if self.response.expose_internal_errors && self.response.format == BodyFormat::Text {
            warnings.push("internal error details will be written as plain text bodies");
        }

        warnings
    }
}
