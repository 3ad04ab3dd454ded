use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("odoo version is required, pass --odoo-version or set odoo.version in the context")]
    MissingVersion,

    #[error("invalid odoo version {raw:?}: expected MAJOR[.MINOR]")]
    InvalidVersion { raw: String },

    #[error("odoo version {version} is not supported (supported up to 15.0)")]
    UnsupportedVersion { version: String },

    #[error("cannot read a python version from interpreter {python_bin:?}")]
    InvalidPython { python_bin: String },

    #[error("placeholder {{{key}}} in {template:?} does not resolve against the context")]
    MissingKey { key: String, template: String },

    #[error("malformed placeholder in {template:?}: {reason}")]
    BadPlaceholder {
        template: String,
        reason: &'static str,
    },

    #[error("failed to load service manifest {path}: {detail}")]
    Manifest { path: PathBuf, detail: String },

    #[error("environment {env:?} not found in service manifest (available: {})", available.join(", "))]
    EnvironmentNotFound { env: String, available: Vec<String> },

    #[error("template {name:?} not found in any template location")]
    TemplateNotFound { name: String },

    #[error("failed to parse template: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("failed to render template: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("failed to load config {path}: {detail}")]
    Config { path: PathBuf, detail: String },

    #[error("failed to serialize context: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Stable identifier written in the JSON error payload.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MissingVersion => "missing_version",
            Error::InvalidVersion { .. } => "invalid_version",
            Error::UnsupportedVersion { .. } => "unsupported_version",
            Error::InvalidPython { .. } => "invalid_python",
            Error::MissingKey { .. } => "missing_key",
            Error::BadPlaceholder { .. } => "bad_placeholder",
            Error::Manifest { .. } => "manifest",
            Error::EnvironmentNotFound { .. } => "environment_not_found",
            Error::TemplateNotFound { .. } => "template_not_found",
            Error::Template(_) => "template",
            Error::Render(_) => "render",
            Error::Config { .. } => "config",
            Error::Serialize(_) => "serialize",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_not_found_lists_available() {
        let err = Error::EnvironmentNotFound {
            env: "prod".to_string(),
            available: vec!["dev".to_string(), "staging".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "environment \"prod\" not found in service manifest (available: dev, staging)"
        );
        assert_eq!(err.kind(), "environment_not_found");
    }

    #[test]
    fn test_missing_key_message() {
        let err = Error::MissingKey {
            key: "odoo[ref]".to_string(),
            template: "{odoo[ref]}".to_string(),
        };
        assert!(err.to_string().contains("{odoo[ref]}"));
        assert_eq!(err.kind(), "missing_key");
    }

    #[test]
    fn test_serialize_error_kind() {
        let err: Error = serde_json::from_str::<u32>("x").unwrap_err().into();
        assert_eq!(err.kind(), "serialize");
        assert!(err.to_string().starts_with("failed to serialize context"));
    }
}
