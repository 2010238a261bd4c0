use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodefixConfig {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub panel: PanelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the fix/analysis backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Only documents declaring this language are captured and patched.
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Directory holding the host page template and the UI bundle.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
}

fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}
fn default_timeout() -> u64 {
    120
}
fn default_language() -> String {
    "python".to_string()
}
fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

impl Default for CodefixConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            editor: EditorConfig::default(),
            panel: PanelConfig::default(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
        }
    }
}

impl CodefixConfig {
    /// Load config from ~/.config/codefix/config.toml, creating defaults if missing.
    pub fn load() -> crate::error::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(|e| {
                crate::error::CodefixError::Config(format!("Failed to read config: {e}"))
            })?;
            let config: CodefixConfig = toml::from_str(&contents).map_err(|e| {
                crate::error::CodefixError::Config(format!("Failed to parse config: {e}"))
            })?;
            Ok(config)
        } else {
            let config = CodefixConfig::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save config to disk.
    pub fn save(&self) -> crate::error::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| {
            crate::error::CodefixError::Config(format!("Failed to serialize config: {e}"))
        })?;
        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Get the config file path.
    pub fn config_path() -> crate::error::Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            crate::error::CodefixError::Config("Could not determine config directory".into())
        })?;
        Ok(config_dir.join("codefix").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_fills_all_defaults() {
        let config: CodefixConfig = toml::from_str("").unwrap();
        assert_eq!(config.service.base_url, "http://localhost:4000");
        assert_eq!(config.service.timeout_seconds, 120);
        assert_eq!(config.editor.language, "python");
        assert_eq!(config.panel.assets_dir, PathBuf::from("assets"));
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config: CodefixConfig = toml::from_str(
            r#"
            [service]
            base_url = "http://10.0.0.5:9000"
            "#,
        )
        .unwrap();
        assert_eq!(config.service.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.service.timeout_seconds, 120);
        assert_eq!(config.editor.language, "python");
    }
}
