use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::narration;
use crate::ui::theme::DEFAULT_THEME;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_speech_enabled")]
    pub speech_enabled: bool,
    #[serde(default = "default_speech_command")]
    pub speech_command: String,
    #[serde(default = "default_speech_args")]
    pub speech_args: Vec<String>,
    /// Starting directory for the path input on the upload screen.
    #[serde(default = "default_word_list_dir")]
    pub word_list_dir: String,
    /// Overrides the platform data directory for progress and saved lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}
fn default_speech_enabled() -> bool {
    true
}
fn default_speech_command() -> String {
    narration::default_command().0.to_string()
}
fn default_speech_args() -> Vec<String> {
    narration::default_command().1
}
fn default_word_list_dir() -> String {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            speech_enabled: default_speech_enabled(),
            speech_command: default_speech_command(),
            speech_args: default_speech_args(),
            word_list_dir: default_word_list_dir(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordquiz")
            .join("config.toml")
    }

    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(PathBuf::from)
    }

    /// Reset `theme` to the default when it names no known theme.
    /// Call after deserialization so a renamed or deleted theme file does
    /// not leave the UI without colours.
    pub fn normalize_theme(&mut self, valid_names: &[String]) {
        if !valid_names.iter().any(|n| *n == self.theme) {
            self.theme = default_theme();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::Theme;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, DEFAULT_THEME);
        assert!(Theme::available_themes().contains(&config.theme));
        assert!(config.speech_enabled);
        assert!(!config.speech_command.is_empty());
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_config_serde_partial_file() {
        let toml_str = r#"
theme = "midnight"
speech_enabled = false
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "midnight");
        assert!(!config.speech_enabled);
        assert_eq!(config.speech_args, default_speech_args());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.data_dir = Some("/tmp/wq".to_string());
        config.speech_args = vec!["-s".to_string(), "150".to_string()];
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.data_dir, config.data_dir);
        assert_eq!(deserialized.speech_args, config.speech_args);
        assert_eq!(deserialized.word_list_dir, config.word_list_dir);
    }

    #[test]
    fn test_normalize_theme_keeps_known_theme() {
        let mut config = Config::default();
        config.theme = "midnight".to_string();
        config.normalize_theme(&["midnight".to_string(), "terminal-default".to_string()]);
        assert_eq!(config.theme, "midnight");
    }

    #[test]
    fn test_normalize_theme_resets_unknown_theme() {
        let mut config = Config::default();
        config.theme = "does-not-exist".to_string();
        config.normalize_theme(&["midnight".to_string()]);
        assert_eq!(config.theme, "terminal-default");
    }
}
