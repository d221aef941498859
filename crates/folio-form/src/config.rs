#![forbid(unsafe_code)]

//! Form engine configuration.
//!
//! Defaults reproduce the classic behavior: numeric zero fails a required
//! check, whitespace-only text is empty, and the message reads
//! `"<field> is required"`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder substituted with the field name in [`FormConfig::required_message`].
pub const FIELD_PLACEHOLDER: &str = "{field}";

/// Errors that can occur while loading a [`FormConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The input was not valid JSON for a config.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid form config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Tunables for the required check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Treat numeric `0` as missing when a field is required.
    pub numeric_zero_is_empty: bool,
    /// Treat whitespace-only text as missing when a field is required.
    pub trim_required: bool,
    /// Required-error template; `{field}` is replaced by the field name.
    pub required_message: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            numeric_zero_is_empty: true,
            trim_required: true,
            required_message: format!("{FIELD_PLACEHOLDER} is required"),
        }
    }
}

impl FormConfig {
    /// Parse a config from JSON. Missing keys take their defaults.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Set whether numeric zero counts as missing.
    #[must_use]
    pub fn numeric_zero_is_empty(mut self, value: bool) -> Self {
        self.numeric_zero_is_empty = value;
        self
    }

    /// Set whether whitespace-only text counts as missing.
    #[must_use]
    pub fn trim_required(mut self, value: bool) -> Self {
        self.trim_required = value;
        self
    }

    /// Set the required-error template.
    #[must_use]
    pub fn required_message(mut self, template: impl Into<String>) -> Self {
        self.required_message = template.into();
        self
    }

    /// Render the required error for `field`.
    #[must_use]
    pub fn format_required(&self, field: &str) -> String {
        self.required_message.replace(FIELD_PLACEHOLDER, field)
    }
}
