//! Tracker configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a configuration document
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse tracker config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Platform workarounds that can be switched off individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuirkConfig {
    /// Accept pointer-family starts that report no buttons pressed, and exempt
    /// those pointers from the buttonless-move check. Some touch
    /// implementations report `buttons == 0` for a valid contact.
    pub zero_buttons_start: bool,
    /// Treat a non-touch move with no buttons pressed as a cancelled end, for
    /// platforms that drop the up/cancel signal.
    pub end_on_buttonless_move: bool,
}

impl Default for QuirkConfig {
    fn default() -> Self {
        Self {
            zero_buttons_start: true,
            end_on_buttonless_move: true,
        }
    }
}

/// Options fixed at tracker construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    /// Prefer the non-frame-synchronized `pointerrawupdate` move signal where
    /// the host supports it.
    pub raw_updates: bool,
    /// Use mouse and touch events even when pointer events are available.
    pub avoid_pointer_events: bool,
    pub quirks: QuirkConfig,
}

impl TrackerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn raw_updates(mut self, raw_updates: bool) -> Self {
        self.raw_updates = raw_updates;
        self
    }

    pub fn avoid_pointer_events(mut self, avoid: bool) -> Self {
        self.avoid_pointer_events = avoid;
        self
    }

    pub fn quirks(mut self, quirks: QuirkConfig) -> Self {
        self.quirks = quirks;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert!(!config.raw_updates);
        assert!(!config.avoid_pointer_events);
        assert!(config.quirks.zero_buttons_start);
        assert!(config.quirks.end_on_buttonless_move);
    }

    #[test]
    fn test_from_json_partial() {
        let json = r#"{"avoidPointerEvents": true, "quirks": {"zeroButtonsStart": false}}"#;
        let config = TrackerConfig::from_json(json).unwrap();
        assert!(config.avoid_pointer_events);
        assert!(!config.raw_updates);
        assert!(!config.quirks.zero_buttons_start);
        assert!(config.quirks.end_on_buttonless_move);
    }

    #[test]
    fn test_from_json_empty_object() {
        assert_eq!(TrackerConfig::from_json("{}").unwrap(), TrackerConfig::default());
    }

    #[test]
    fn test_from_json_rejects_bad_types() {
        let err = TrackerConfig::from_json(r#"{"rawUpdates": "yes"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse tracker config"));
    }
}
