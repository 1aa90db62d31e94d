use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::speech::SpeechBackend;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width: u16,
    #[serde(default)]
    pub speech_backend: SpeechBackend,
    #[serde(default = "default_log_to_file")]
    pub log_to_file: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

fn default_theme() -> String {
    "slate".to_string()
}
fn default_sidebar_width() -> u16 {
    32
}
fn default_log_to_file() -> bool {
    false
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lingodeck")
        .join("logs")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            sidebar_width: default_sidebar_width(),
            speech_backend: SpeechBackend::default(),
            log_to_file: default_log_to_file(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lingodeck")
            .join("config.toml")
    }

    /// Keep the lesson list readable and leave room for the content pane.
    fn normalize(&mut self) {
        self.sidebar_width = self.sidebar_width.clamp(16, 60);
        if self.log_level.trim().is_empty() {
            self.log_level = default_log_level();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "slate");
        assert_eq!(config.sidebar_width, 32);
        assert_eq!(config.speech_backend, SpeechBackend::Auto);
        assert!(!config.log_to_file);
        assert_eq!(config.log_level, "info");
        assert!(config.log_dir.ends_with("logs"));
    }

    #[test]
    fn test_config_partial_file_keeps_other_defaults() {
        let toml_str = r#"
theme = "catppuccin-mocha"
speech_backend = "none"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(config.speech_backend, SpeechBackend::None);
        assert_eq!(config.sidebar_width, 32);
    }

    #[test]
    fn test_config_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            theme: "catppuccin-mocha".to_string(),
            speech_backend: SpeechBackend::EspeakNg,
            log_to_file: true,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme, "catppuccin-mocha");
        assert_eq!(loaded.speech_backend, SpeechBackend::EspeakNg);
        assert!(loaded.log_to_file);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.theme, "slate");
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "sidebar_width = \"wide\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_sidebar_width_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "sidebar_width = 4\nlog_level = \"\"").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.sidebar_width, 16);
        assert_eq!(config.log_level, "info");
    }
}
