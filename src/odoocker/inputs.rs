// Turns the different ways of describing an image (flags, service manifest,
// stdin) into builder overrides.

use std::path::PathBuf;

use super::context::{OdooOverrides, Overrides, DEFAULT_LANGUAGES, DEFAULT_REPO};
use super::error::{Error, Result};
use super::manifest::ServiceManifests;
use super::version::OdooVersion;

#[derive(Debug, Clone)]
pub struct SourceFlags {
    pub version: Option<String>,
    pub git_ref: Option<String>,
    pub release: Option<String>,
    pub repo: String,
    pub languages: String,
}

impl Default for SourceFlags {
    fn default() -> Self {
        Self {
            version: None,
            git_ref: None,
            release: None,
            repo: DEFAULT_REPO.to_string(),
            languages: DEFAULT_LANGUAGES.to_string(),
        }
    }
}

impl SourceFlags {
    /// True when any of version/ref/release was given explicitly.
    pub fn is_explicit(&self) -> bool {
        self.version.is_some() || self.git_ref.is_some() || self.release.is_some()
    }
}

pub enum Input {
    Flags(SourceFlags),
    Service {
        file: PathBuf,
        env: String,
        flags: SourceFlags,
    },
    Stdin,
}

impl Input {
    /// Service file beats explicit version/ref/release flags, which beat stdin.
    pub fn select(flags: SourceFlags, file: Option<PathBuf>, env: Option<String>, stdin: bool) -> Self {
        match (file, env) {
            (Some(file), Some(env)) => Input::Service { file, env, flags },
            _ if flags.is_explicit() || !stdin => Input::Flags(flags),
            _ => Input::Stdin,
        }
    }
}

pub fn from_flags(flags: SourceFlags) -> Result<Overrides> {
    let version = flags
        .version
        .as_deref()
        .map(OdooVersion::parse)
        .transpose()?;
    let release = flags.release.unwrap_or_default();
    let mut git_ref = flags.git_ref.unwrap_or_default();
    // Without a release nor a ref, check out the version branch.
    if release.is_empty() && git_ref.is_empty() {
        if let Some(v) = flags.version {
            git_ref = v;
        }
    }
    Ok(Overrides {
        odoo: OdooOverrides {
            version,
            git_ref: Some(git_ref),
            release: Some(release),
            repo: Some(flags.repo),
            languages: Some(flags.languages),
            ..Default::default()
        },
        ..Default::default()
    })
}

pub fn from_service(manifests: &ServiceManifests, env: &str, flags: SourceFlags) -> Result<Overrides> {
    let service = manifests.service(env)?;
    let version = service.version().cloned().ok_or(Error::MissingVersion)?;
    let git_ref = service
        .odoo
        .repo
        .git_ref
        .clone()
        .unwrap_or_else(|| version.to_string());
    Ok(Overrides {
        odoo: OdooOverrides {
            version: Some(version),
            git_ref: Some(git_ref),
            release: Some(String::new()),
            repo: Some(service.odoo.repo.url.clone().unwrap_or(flags.repo)),
            languages: Some(service.odoo.languages.clone().unwrap_or(flags.languages)),
            ..Default::default()
        },
        ..Default::default()
    })
}
