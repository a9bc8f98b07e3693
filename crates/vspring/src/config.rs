//! TOML configuration for spring generation.
//!
//! ```toml
//! cap_end = false
//!
//! [spring]
//! turns = 5.0
//! height = 30.0
//! spring_radius = 8.0
//! wire_radius = 1.0
//! segments_per_turn = 36
//! circle_segments = 24   # optional
//!
//! [limits]               # optional
//! max_vertices = 5000000
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Limits, SpringError, SpringParams, SpringRequest};

/// Contents of a spring configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpringConfig {
    /// Close the trailing end of the wire.
    #[serde(default)]
    pub cap_end: bool,
    /// Spring shape. Every field except `circle_segments` is required.
    pub spring: SpringParams,
    /// Resource bounds.
    #[serde(default)]
    pub limits: Limits,
}

impl SpringConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, SpringError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SpringError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::debug!("loading spring config from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Render as TOML text.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Turn the configuration into a generation request.
    pub fn request(&self) -> SpringRequest {
        SpringRequest::new(self.spring.clone())
            .with_limits(self.limits.clone())
            .with_end_cap(self.cap_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = SpringConfig::from_toml_str(
            r#"
            cap_end = true

            [spring]
            turns = 5.0
            height = 30.0
            spring_radius = 8.0
            wire_radius = 0.75
            segments_per_turn = 36
            circle_segments = 16

            [limits]
            max_vertices = 1000
            "#,
        )
        .unwrap();

        assert!(config.cap_end);
        assert_eq!(config.spring.turns, 5.0);
        assert_eq!(config.spring.wire_radius, 0.75);
        assert_eq!(config.spring.circle_segments, 16);
        assert_eq!(config.limits.max_vertices, 1000);

        let request = config.request();
        assert!(request.cap_end);
        assert_eq!(request.params, config.spring);
        assert!(request.cancel.is_none());
    }

    #[test]
    fn test_circle_segments_and_limits_default() {
        let config = SpringConfig::from_toml_str(
            r#"
            [spring]
            turns = 2.0
            height = 10.0
            spring_radius = 4.0
            wire_radius = 0.5
            segments_per_turn = 24
            "#,
        )
        .unwrap();
        assert_eq!(config.spring.circle_segments, 24);
        assert_eq!(config.limits, Limits::default());
        assert!(!config.cap_end);
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        let err = SpringConfig::from_toml_str(
            r#"
            [spring]
            turns = 2.0
            height = 10.0
            wire_radius = 0.5
            segments_per_turn = 24
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SpringError::Config(_)));
        assert!(err.to_string().contains("spring_radius"), "{err}");
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        let err = SpringConfig::from_toml_str(
            r#"
            [spring]
            turns = 2.0
            height = 10.0
            spring_radius = 4.0
            wire_radius = 0.5
            segments_per_turn = 24
            pitch = 5.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SpringError::Config(_)));
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = SpringConfig::default();
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("[spring]"));
        assert_eq!(SpringConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = SpringConfig::from_path("/nonexistent/vspring.toml").unwrap_err();
        assert!(matches!(err, SpringError::Io(_)));
    }
}
