use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::job::PresubmitConfig;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Location of the optional user overlay.
const USER_CONFIG: &str = "~/.config/presubmit-filter/config.toml";

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub presubmits: Vec<PresubmitConfig>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub honor_ok_to_test: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_decisions: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            honor_ok_to_test: false,
            log_level: default_log_level(),
            log_decisions: false,
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

impl Settings {
    /// Parsed log level; unknown names fall back to `info`.
    pub fn level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    presubmits: Option<Vec<PresubmitConfig>>,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    honor_ok_to_test: Option<bool>,
    log_level: Option<String>,
    log_decisions: Option<bool>,
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Embedded defaults, then the user overlay from
    /// `~/.config/presubmit-filter/config.toml` if it exists.
    ///
    /// Scalars in the overlay override; a `presubmits` list replaces the default one.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    fn load_overlay() -> Option<ConfigOverlay> {
        let path = shellexpand::tilde(USER_CONFIG);
        let content = std::fs::read_to_string(path.as_ref()).ok()?;
        match Self::parse_overlay(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("presubmit-filter: {e}");
                None
            }
        }
    }

    fn parse_overlay(content: &str) -> Result<ConfigOverlay> {
        Ok(toml::from_str(content)?)
    }

    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let s = overlay.settings;
        if let Some(v) = s.honor_ok_to_test {
            self.settings.honor_ok_to_test = v;
        }
        if let Some(v) = s.log_level {
            self.settings.log_level = v;
        }
        if let Some(v) = s.log_decisions {
            self.settings.log_decisions = v;
        }
        if let Some(presubmits) = overlay.presubmits {
            self.presubmits = presubmits;
        }
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config = Config::default_config();
        assert!(!config.settings.honor_ok_to_test);
        assert!(config.settings.log_decisions);
        assert_eq!(config.settings.level(), LevelFilter::Info);
        assert!(config.presubmits.is_empty());
    }

    #[test]
    fn overlay_overrides_scalars() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [settings]
            honor_ok_to_test = true
            log_level = "debug"
        "#,
        );
        assert!(config.settings.honor_ok_to_test);
        assert_eq!(config.settings.level(), LevelFilter::Debug);
        // Untouched scalar keeps its default
        assert!(config.settings.log_decisions);
    }

    #[test]
    fn overlay_replaces_presubmits() {
        let mut config = Config::default_config();
        config.presubmits.push(PresubmitConfig {
            name: "old".into(),
            ..Default::default()
        });
        config.apply_overlay_str(
            r#"
            [[presubmits]]
            name = "unit"
            context = "ci/unit"
            always_run = true

            [[presubmits]]
            name = "docs"
            run_if_changed = "^docs/"
            optional = true
        "#,
        );
        let names: Vec<_> = config.presubmits.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["unit", "docs"]);
        assert!(config.presubmits[1].optional);
        assert_eq!(config.presubmits[1].run_if_changed, "^docs/");
    }

    #[test]
    fn empty_overlay_changes_nothing() {
        let mut config = Config::default_config();
        config.apply_overlay_str("");
        assert!(!config.settings.honor_ok_to_test);
        assert!(config.presubmits.is_empty());
    }

    #[test]
    fn malformed_overlay_is_config_error() {
        let err = Config::parse_overlay("[settings\nhonor_ok_to_test = ").unwrap_err();
        assert!(matches!(err, crate::error::Error::Config(_)));
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let settings = Settings {
            log_level: "loud".into(),
            ..Default::default()
        };
        assert_eq!(settings.level(), LevelFilter::Info);
    }
}
