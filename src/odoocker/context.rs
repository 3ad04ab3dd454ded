use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::error::{Error, Result};
use super::version::OdooVersion;

pub const DEFAULT_REPO: &str = "https://github.com/odoo/odoo.git";
pub const DEFAULT_LANGUAGES: &str = "all";

// Keys the builder always recomputes; caller values for them are dropped.
pub const COMPUTED_KEYS: &[&str] = &[
    "python_bin",
    "os_name",
    "os_version",
    "os_release",
    "os_arch",
    "deb_repos",
    "base_packages",
    "steps",
    "odoo_pip_packages",
    "odoo_packages",
    "labels",
    "environments",
];

// BuildContext is the fully derived record the templates are rendered with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildContext {
    pub odoo: OdooSource,
    pub python_bin: String,
    pub os_name: String,
    pub os_version: String,
    pub os_release: String,
    pub os_arch: String,
    pub base_packages: Vec<String>,
    pub odoo_packages: Vec<String>,
    pub odoo_pip_packages: Vec<String>,
    pub deb_repos: Vec<DebRepo>,
    pub steps: Vec<String>,
    pub labels: BTreeMap<String, String>,
    pub environments: BTreeMap<String, String>,
    pub user: User,
    #[serde(default)]
    pub deb_files: Vec<DebFile>,
    #[serde(default)]
    pub template_dirs: Vec<PathBuf>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OdooSource {
    pub version: OdooVersion,
    #[serde(rename = "ref", default)]
    pub git_ref: String,
    #[serde(default)]
    pub release: String,
    #[serde(default = "default_repo")]
    pub repo: String,
    #[serde(default = "default_languages")]
    pub languages: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "stringly")]
    pub uid: String,
    #[serde(deserialize_with = "stringly")]
    pub gid: String,
}

impl Default for User {
    fn default() -> Self {
        Self {
            uid: "1000".to_string(),
            gid: "1000".to_string(),
        }
    }
}

/// An extra apt repository. Either `key` (fetched from a keyserver) with
/// `url`/`repo`, or `key_url` with `list_url`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebRepo {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub key_url: Option<String>,
    #[serde(default)]
    pub list_url: Option<String>,
    #[serde(default)]
    pub environments: BTreeMap<String, String>,
    #[serde(default)]
    pub packages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebFile {
    pub url: String,
    pub name: String,
}

/// Caller supplied partial context, merged over the builder defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Overrides {
    #[serde(default)]
    pub odoo: OdooOverrides,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub deb_files: Vec<DebFile>,
    #[serde(default)]
    pub template_dirs: Vec<PathBuf>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OdooOverrides {
    #[serde(default)]
    pub version: Option<OdooVersion>,
    #[serde(rename = "ref", default)]
    pub git_ref: Option<String>,
    #[serde(default)]
    pub release: Option<String>,
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub languages: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OdooOverrides {
    pub fn resolve(self) -> Result<OdooSource> {
        let version = self.version.ok_or(Error::MissingVersion)?;
        Ok(OdooSource {
            version,
            git_ref: self.git_ref.unwrap_or_default(),
            release: self.release.unwrap_or_default(),
            repo: self.repo.unwrap_or_else(default_repo),
            languages: self.languages.unwrap_or_else(default_languages),
            extra: self.extra,
        })
    }
}

impl From<BuildContext> for Overrides {
    fn from(ctx: BuildContext) -> Self {
        Overrides {
            odoo: OdooOverrides {
                version: Some(ctx.odoo.version),
                git_ref: Some(ctx.odoo.git_ref),
                release: Some(ctx.odoo.release),
                repo: Some(ctx.odoo.repo),
                languages: Some(ctx.odoo.languages),
                extra: ctx.odoo.extra,
            },
            user: Some(ctx.user),
            deb_files: ctx.deb_files,
            template_dirs: ctx.template_dirs,
            extra: ctx.extra,
        }
    }
}

fn default_repo() -> String {
    DEFAULT_REPO.to_string()
}

fn default_languages() -> String {
    DEFAULT_LANGUAGES.to_string()
}

// Accepts "1000" as well as 1000.
fn stringly<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or a number, got {}",
            other
        ))),
    }
}
