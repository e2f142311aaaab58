use std::str::FromStr;

use scene::SceneConfig;
use serde::Deserialize;
use support::SupportConfig;

use crate::error::ViewerError;

/// Id of the optional `<script type="application/json">` element holding
/// page configuration.
pub const CONFIG_ELEMENT_ID: &str = "globe-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
    /// Text put in the loading indicator when the viewer cannot start.
    pub loading_error_text: String,
    pub scene: SceneConfig,
    pub support: SupportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            loading_error_text: "Failed to load the globe.".to_string(),
            scene: SceneConfig::default(),
            support: SupportConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self, ViewerError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(text)?)
    }

    /// Parses `text`, falling back to defaults on malformed input. The
    /// error is returned alongside so it can be logged once logging is up.
    pub fn from_json_or_default(text: Option<&str>) -> (Self, Option<ViewerError>) {
        match text.map(Self::from_json) {
            None => (Self::default(), None),
            Some(Ok(config)) => (config, None),
            Some(Err(err)) => (Self::default(), Some(err)),
        }
    }

    pub fn level(&self) -> log::Level {
        log::Level::from_str(self.log_level.trim()).unwrap_or(log::Level::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_sections_override_independently() {
        let cfg = AppConfig::from_json(
            r#"{
                "log_level": "debug",
                "scene": { "marker_count": 5 },
                "support": { "send_delay_ms": 0 }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.level(), log::Level::Debug);
        assert_eq!(cfg.scene.marker_count, 5);
        assert_eq!(cfg.scene.star_count, 10_000);
        assert_eq!(cfg.support.send_delay_ms, 0);
        assert_eq!(cfg.support.locale, "ru-RU");
    }

    #[test]
    fn blank_text_is_default() {
        assert_eq!(AppConfig::from_json("  \n").unwrap(), AppConfig::default());
    }

    #[test]
    fn malformed_json_falls_back_with_error() {
        let (cfg, err) = AppConfig::from_json_or_default(Some("{ not json"));
        assert_eq!(cfg, AppConfig::default());
        assert!(matches!(err, Some(ViewerError::Config(_))));
    }

    #[test]
    fn unknown_level_means_info() {
        let cfg = AppConfig {
            log_level: "loud".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(cfg.level(), log::Level::Info);
    }
}
