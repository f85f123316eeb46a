//! Consistency checks run after settings are extracted.

use glob::Pattern;
use url::Url;

use crate::error::{ConfigError, Result};
use crate::settings::Settings;

/// Compile a watch glob, naming the setting it came from on failure.
pub fn validate_pattern(field: &str, pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        value: pattern.to_string(),
        hint: format!("Not a valid glob pattern: {}", e.msg),
    })
}

impl Settings {
    /// Validate settings for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if !self.url_pattern.contains("{appname}") {
            return Err(ConfigError::InvalidValue {
                field: "url_pattern".to_string(),
                value: self.url_pattern.clone(),
                hint: "The pattern must contain an {appname} placeholder".to_string(),
            });
        }

        let sample = self.app_url("app");
        let parsed = Url::parse(&sample).map_err(|e| ConfigError::InvalidValue {
            field: "url_pattern".to_string(),
            value: self.url_pattern.clone(),
            hint: format!("Expected an absolute http URL ({e})"),
        })?;
        if parsed.host_str().is_none() {
            return Err(ConfigError::InvalidValue {
                field: "url_pattern".to_string(),
                value: self.url_pattern.clone(),
                hint: "The URL needs a host the build server can bind to".to_string(),
            });
        }

        if self.sencha_command.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "sencha_command".to_string(),
                value: String::new(),
                hint: "Name the sencha executable, e.g. \"sencha\"".to_string(),
            });
        }

        if self.tool_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "tool_timeout_secs".to_string(),
                value: "0".to_string(),
                hint: "Omit the setting to disable the timeout".to_string(),
            });
        }

        if let Some(app) = self.installed_apps.iter().find(|a| a.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "installed_apps".to_string(),
                value: format!("{app:?}"),
                hint: "Remove empty identifiers from installed_apps".to_string(),
            });
        }

        for pattern in &self.watch.include {
            validate_pattern("watch.include", pattern)?;
        }
        for pattern in &self.watch.exclude {
            validate_pattern("watch.exclude", pattern)?;
        }

        Ok(())
    }
}
