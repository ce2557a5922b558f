//! Invocation defaults loaded from a YAML file on disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Defaults applied when the corresponding flag is not given. CLI flags
/// always win.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Defaults {
    /// Per-appliance timeout in seconds.
    pub timeout: Option<u64>,
    /// Directory artifacts are written under.
    pub out_dir: Option<PathBuf>,
    /// Whether to verify TLS hostnames by default.
    pub verify_hostname: Option<bool>,
}

/// Loads [`Defaults`] from `~/.armada/config.yaml`, or the file named by the
/// `ARMADA_CONFIG` environment variable.
pub struct YamlDefaultsStore;

impl YamlDefaultsStore {
    /// Load defaults; a missing file yields `Defaults::default()`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Defaults> {
        self.load_from(&self.path()?)
    }

    /// Load defaults from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(&self, path: &std::path::Path) -> Result<Defaults> {
        if !path.exists() {
            return Ok(Defaults::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    /// Resolve the config file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var("ARMADA_CONFIG") {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".armada").join("config.yaml"))
    }
}
