use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::navigator::PANEL_COUNT;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "edudeck";

pub const VALID_KEYS: &[&str] = &[
    "defaults.theme",
    "defaults.transition",
    "defaults.start_panel",
    "defaults.windowed",
];

const THEMES: &[&str] = &["light", "dark"];
const TRANSITIONS: &[&str] = &["slide", "fade", "none"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,

    /// `intro` or a 1-indexed panel number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_panel: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windowed: Option<bool>,
}

/// Where the dashboard opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPanel {
    Intro,
    /// Zero-based panel index.
    Panel(usize),
}

impl StartPanel {
    /// Parse `intro` or a panel number in `1..=PANEL_COUNT`.
    pub fn parse(value: &str) -> Option<Self> {
        if value == "intro" {
            return Some(Self::Intro);
        }
        match value.parse::<usize>() {
            Ok(n) if (1..=PANEL_COUNT).contains(&n) => Some(Self::Panel(n - 1)),
            _ => None,
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `edudeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load the file at `path`, or an empty config if it does not exist yet.
    /// Unreadable or unparseable files are errors, so callers that save
    /// afterwards never clobber hand-edited settings.
    pub fn load_or_new_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => serde_yaml::from_str(&contents)
                .with_context(|| format!("Invalid config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(anyhow::anyhow!("Failed to read config: {e}")),
        }
    }

    pub fn load_or_default() -> Self {
        let loaded = Self::path().and_then(|path| Self::load_or_new_from(&path));
        match loaded {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring config: {e:#}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# edudeck configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let defaults = self.defaults.get_or_insert_with(DefaultsConfig::default);
        match key {
            "defaults.theme" => {
                if !THEMES.contains(&value) {
                    anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'.");
                }
                defaults.theme = Some(value.to_string());
            }
            "defaults.transition" => {
                if !TRANSITIONS.contains(&value) {
                    anyhow::bail!("Invalid transition: {value}. Must be 'slide', 'fade', or 'none'.");
                }
                defaults.transition = Some(value.to_string());
            }
            "defaults.start_panel" => {
                if StartPanel::parse(value).is_none() {
                    anyhow::bail!(
                        "Invalid start_panel: {value}. Must be 'intro' or a panel number from 1 to {PANEL_COUNT}."
                    );
                }
                defaults.start_panel = Some(value.to_string());
            }
            "defaults.windowed" => {
                let windowed = match value {
                    "true" => true,
                    "false" => false,
                    _ => anyhow::bail!("Invalid windowed: {value}. Must be 'true' or 'false'."),
                };
                defaults.windowed = Some(windowed);
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: {}",
                VALID_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Configured theme name. Unknown names are ignored with a warning.
    pub fn theme(&self) -> Option<&str> {
        let raw = self.defaults.as_ref()?.theme.as_deref()?;
        known("defaults.theme", raw, THEMES)
    }

    /// Configured transition name. Unknown names are ignored with a warning.
    pub fn transition(&self) -> Option<&str> {
        let raw = self.defaults.as_ref()?.transition.as_deref()?;
        known("defaults.transition", raw, TRANSITIONS)
    }

    /// Configured start panel. Values edited by hand into something invalid
    /// are ignored with a warning.
    pub fn start_panel(&self) -> Option<StartPanel> {
        let raw = self.defaults.as_ref()?.start_panel.as_deref()?;
        let parsed = StartPanel::parse(raw);
        if parsed.is_none() {
            tracing::warn!("ignoring invalid defaults.start_panel: {raw}");
        }
        parsed
    }

    pub fn windowed(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.windowed)
            .unwrap_or(false)
    }
}

fn known<'a>(key: &str, value: &'a str, allowed: &[&str]) -> Option<&'a str> {
    if allowed.contains(&value) {
        Some(value)
    } else {
        tracing::warn!("ignoring invalid {key}: {value}");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_valid_values() {
        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        config.set("defaults.transition", "fade").unwrap();
        config.set("defaults.start_panel", "8").unwrap();
        config.set("defaults.windowed", "true").unwrap();

        assert_eq!(config.theme(), Some("dark"));
        assert_eq!(config.transition(), Some("fade"));
        assert_eq!(config.start_panel(), Some(StartPanel::Panel(7)));
        assert!(config.windowed());
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = Config::default();
        assert!(config.set("defaults.theme", "solarized").is_err());
        assert!(config.set("defaults.transition", "spatial").is_err());
        assert!(config.set("defaults.start_panel", "0").is_err());
        assert!(config.set("defaults.start_panel", "9").is_err());
        assert!(config.set("defaults.windowed", "yes").is_err());
        assert_eq!(config.theme(), None);
    }

    #[test]
    fn test_unknown_key_lists_valid_keys() {
        let mut config = Config::default();
        let err = config.set("defaults.aspect", "16:9").unwrap_err().to_string();
        for key in VALID_KEYS {
            assert!(err.contains(key), "{err}");
        }
    }

    #[test]
    fn test_start_panel_parse() {
        assert_eq!(StartPanel::parse("intro"), Some(StartPanel::Intro));
        assert_eq!(StartPanel::parse("1"), Some(StartPanel::Panel(0)));
        assert_eq!(StartPanel::parse("first"), None);
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(FILENAME);

        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        config.set("defaults.start_panel", "intro").unwrap();
        config.save_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("# edudeck configuration"));
        assert!(!contents.contains("transition"));

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_has_friendly_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join(FILENAME)).unwrap_err();
        assert!(err.to_string().contains("edudeck config show"));
    }

    #[test]
    fn test_load_or_new_only_defaults_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILENAME);
        assert_eq!(Config::load_or_new_from(&path).unwrap(), Config::default());

        std::fs::write(&path, "defaults:\n  windowed: yes\n").unwrap();
        assert!(Config::load_or_new_from(&path).is_err());
    }

    #[test]
    fn test_hand_edited_unknown_names_are_ignored() {
        let config: Config =
            serde_yaml::from_str("defaults:\n  theme: sepia\n  transition: spatial\n").unwrap();
        assert_eq!(config.theme(), None);
        assert_eq!(config.transition(), None);

        let config: Config = serde_yaml::from_str("defaults:\n  theme: dark\n").unwrap();
        assert_eq!(config.theme(), Some("dark"));
    }

    #[test]
    fn test_invalid_start_panel_in_file_is_ignored() {
        let config: Config = serde_yaml::from_str("defaults:\n  start_panel: \"42\"\n").unwrap();
        assert_eq!(config.start_panel(), None);
    }
}
