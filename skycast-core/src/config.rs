use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather application identifier, appended to every request.
    pub app_id: Option<String>,
}

impl Config {
    /// The application id to use: the configured value, falling back to the
    /// identifier baked in at build time.
    pub fn resolved_app_id(&self) -> Result<String> {
        self.app_id
            .clone()
            .or_else(|| option_env!("OPENWEATHER_APP_ID").map(str::to_owned))
            .ok_or_else(|| {
                anyhow!(
                    "No application id configured.\n\
                     Hint: run `skycast configure` and enter your OpenWeather API key."
                )
            })
    }

    pub fn set_app_id(&mut self, app_id: String) {
        self.app_id = Some(app_id);
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_app_id_is_returned_by_resolution() {
        let mut cfg = Config::default();
        cfg.set_app_id("OPEN_KEY".into());

        let resolved = cfg.resolved_app_id().expect("app id must resolve");
        assert_eq!(resolved, "OPEN_KEY");
    }

    #[test]
    fn resolution_errors_with_hint_when_unset() {
        // Only meaningful when no id was baked in at build time.
        if option_env!("OPENWEATHER_APP_ID").is_some() {
            return;
        }

        let cfg = Config::default();
        let err = cfg.resolved_app_id().unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No application id configured"));
        assert!(msg.contains("Hint: run `skycast configure`"));
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let mut cfg = Config::default();
        cfg.set_app_id("OPEN_KEY".into());

        let serialized = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&serialized).expect("parse");
        assert_eq!(parsed.app_id.as_deref(), Some("OPEN_KEY"));
    }
}
