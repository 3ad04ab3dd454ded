// Resolved service manifest: one entry per deployment environment, each
// carrying the odoo version and where to fetch the sources from.

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use super::error::{Error, Result};
use super::version::OdooVersion;

#[derive(Debug, Default, Deserialize)]
pub struct ServiceManifests {
    #[serde(default)]
    pub services: BTreeMap<String, Service>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub odoo_version: Option<OdooVersion>,
    #[serde(default)]
    pub odoo: ServiceOdoo,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServiceOdoo {
    #[serde(default)]
    pub version: Option<OdooVersion>,
    #[serde(default)]
    pub languages: Option<String>,
    #[serde(default)]
    pub repo: ServiceRepo,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServiceRepo {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "ref", alias = "commit", default)]
    pub git_ref: Option<String>,
}

impl ServiceManifests {
    pub fn load(path: &Path) -> Result<Self> {
        let manifest_err = |detail: String| Error::Manifest {
            path: path.to_path_buf(),
            detail,
        };
        let raw = std::fs::read_to_string(path).map_err(|e| manifest_err(e.to_string()))?;
        let manifests = Self::parse(&raw).map_err(|e| manifest_err(e.to_string()))?;
        debug!(
            "Loaded {} service(s) from {}",
            manifests.services.len(),
            path.display()
        );
        Ok(manifests)
    }

    pub fn parse(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn service(&self, env: &str) -> Result<&Service> {
        self.services
            .get(env)
            .ok_or_else(|| Error::EnvironmentNotFound {
                env: env.to_string(),
                available: self.services.keys().cloned().collect(),
            })
    }
}

impl Service {
    /// `odoo_version` wins over `odoo.version`.
    pub fn version(&self) -> Option<&OdooVersion> {
        self.odoo_version.as_ref().or(self.odoo.version.as_ref())
    }
}
