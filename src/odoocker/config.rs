use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use super::context::DebRepo;
use super::error::{Error, Result};
use super::repos;

/// Environment variable pinning the `created` label, for reproducible builds.
pub const CUR_DATE_ENV: &str = "CUR_DATE";

/// Knobs of the context builder that are not part of the build context itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Packages installed with pip once Odoo is in place.
    #[serde(default)]
    pub pip_packages: Vec<String>,
    /// Repository templates, interpolated against the context.
    #[serde(default = "repos::default_repos")]
    pub deb_repos: Vec<DebRepo>,
    #[serde(default = "default_arch")]
    pub arch: String,
    /// Creation date (YYYYMMDD) used in the OCI labels. Today when unset.
    #[serde(default)]
    pub created_date: Option<String>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            pip_packages: Vec::new(),
            deb_repos: repos::default_repos(),
            arch: default_arch(),
            created_date: None,
        }
    }
}

fn default_arch() -> String {
    "amd64".to_string()
}

impl BuilderConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let config_err = |detail: String| Error::Config {
            path: path.to_path_buf(),
            detail,
        };
        let raw = std::fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
        let config: BuilderConfig =
            serde_json::from_str(&raw).map_err(|e| config_err(e.to_string()))?;
        debug!("Loaded builder config from {}", path.display());
        Ok(config)
    }

    /// Loads `path` when given, else `~/.odoocker/config.json` if present,
    /// else the defaults. `CUR_DATE` overrides the configured creation date.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load(&path)?,
                _ => Self::default(),
            },
        };
        Ok(config.pin_date(std::env::var(CUR_DATE_ENV).ok()))
    }

    fn pin_date(mut self, date: Option<String>) -> Self {
        if let Some(date) = date {
            debug!("Pinning creation date from {}: {}", CUR_DATE_ENV, date);
            self.created_date = Some(date);
        }
        self
    }
}

fn default_config_path() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(".odoocker").join("config.json"))
}
