use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "lexdeck";

const DEFAULT_ANALYSIS_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// "first" or a slide number to start on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_mode: Option<String>,
}

/// Settings for the remote speech-analysis service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// API key. If not set, falls back to the GEMINI_API_KEY
    /// environment variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl AnalysisConfig {
    pub const ENV_VAR: &'static str = "GEMINI_API_KEY";

    /// Resolve the API key from config or environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = &self.api_key
            && !key.is_empty()
        {
            return Some(key.clone());
        }
        std::env::var(Self::ENV_VAR).ok()
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_ANALYSIS_MODEL)
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
                anyhow::anyhow!("No config found. Run `lexdeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# LexDeck configuration\n{yaml}");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "defaults.start_mode" => {
                if value != "first" && value.parse::<usize>().is_err() {
                    anyhow::bail!(
                        "Invalid start_mode: {value}. Must be 'first' or a slide number."
                    );
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .start_mode = Some(value.to_string());
            }
            "analysis.api_key" => {
                self.analysis
                    .get_or_insert_with(AnalysisConfig::default)
                    .api_key = Some(value.to_string());
            }
            "analysis.model" => {
                self.analysis
                    .get_or_insert_with(AnalysisConfig::default)
                    .model = Some(value.to_string());
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.theme, defaults.start_mode, analysis.api_key, analysis.model"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_valid_theme() {
        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        assert_eq!(config.defaults.unwrap().theme.as_deref(), Some("dark"));
    }

    #[test]
    fn test_set_invalid_theme_rejected() {
        let mut config = Config::default();
        assert!(config.set("defaults.theme", "sepia").is_err());
    }

    #[test]
    fn test_set_start_mode_accepts_slide_number() {
        let mut config = Config::default();
        config.set("defaults.start_mode", "7").unwrap();
        config.set("defaults.start_mode", "first").unwrap();
        assert!(config.set("defaults.start_mode", "overview").is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut config = Config::default();
        assert!(config.set("no.such.key", "x").is_err());
    }

    #[test]
    fn test_analysis_model_default() {
        let analysis = AnalysisConfig::default();
        assert_eq!(analysis.model(), DEFAULT_ANALYSIS_MODEL);
    }

    #[test]
    fn test_config_key_wins_over_env() {
        let analysis = AnalysisConfig {
            api_key: Some("from-config".to_string()),
            model: None,
        };
        assert_eq!(analysis.resolve_api_key().as_deref(), Some("from-config"));
    }
}
