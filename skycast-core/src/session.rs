use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Capability for remembering whether the user is signed in across restarts.
///
/// Injected into whichever screen needs it instead of being reached through
/// ambient shared storage.
pub trait SessionStore: Send + Sync {
    /// Read the persisted flag. A store that was never written reads `false`.
    fn is_signed_in(&self) -> bool;

    /// Overwrite the persisted flag. Immediate apply, last write wins.
    fn set_signed_in(&self, signed_in: bool) -> Result<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct SessionFile {
    signed_in: bool,
}

/// File-backed session store: one boolean persisted as TOML in the platform
/// config directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store under the platform config directory.
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(Self {
            path: dirs.config_dir().join("session.toml"),
        })
    }

    /// Store at an explicit path. Used by tests.
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStore for FileSessionStore {
    fn is_signed_in(&self) -> bool {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|contents| toml::from_str::<SessionFile>(&contents).ok())
            .map(|file| file.signed_in)
            .unwrap_or(false)
    }

    fn set_signed_in(&self, signed_in: bool) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create session directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(&SessionFile { signed_in })
            .context("Failed to serialize session state")?;

        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write session file: {}", self.path.display()))?;

        tracing::debug!(signed_in, path = %self.path.display(), "session flag written");
        Ok(())
    }
}
