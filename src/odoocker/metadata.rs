use std::collections::BTreeMap;

use serde_json::Value;
use time::OffsetDateTime;

use super::error::Result;
use super::interpolate::interpolate;

/// Build stages, in Dockerfile order. Each one is a template of the same name.
pub const SETUP_STEPS: &[&str] = &[
    "setup_env",
    "setup_base_dependencies",
    "setup_odoo",
    "prepare_user",
    "setup_labels",
    "setup_command",
];

const DESCRIPTION: &str = "Full featured odoo image that make odoo deployment fun and secure.";
const AUTHORS: &str = "Loïc Faure-Lacroix <lamerstar@gmail.com>";
const DOCUMENTATION: &str = "https://github.com/odoo-plus/odootools-docker";
const IMAGE_URL: &str = "https://hub.docker.com/r/llacroix/odoo";
const SOURCE: &str = "https://github.com/odoo-plus/odootools-docker";

const ENVIRONMENTS: &[(&str, &str)] = &[
    ("ODOO_RC", "/etc/odoo/odoo.conf"),
    ("DEPLOYMENT_AREA", "undefined"),
    ("LANG", "C.UTF-8"),
    ("PATH", "/var/lib/odoo/.local/bin:/usr/local/bin:$PATH"),
    ("ODOO_VERSION", "{odoo[version]}"),
    ("ODOO_RELEASE", "{odoo[release]}"),
];

pub fn setup_steps() -> Vec<String> {
    SETUP_STEPS.iter().map(|s| s.to_string()).collect()
}

/// Today in UTC, formatted like Odoo nightly releases (YYYYMMDD).
pub fn current_date() -> String {
    let now = OffsetDateTime::now_utc();
    format!(
        "{:04}{:02}{:02}",
        now.year(),
        u8::from(now.month()),
        now.day()
    )
}

fn interpolate_all(entries: &[(&str, &str)], scope: &Value) -> Result<BTreeMap<String, String>> {
    entries
        .iter()
        .map(|(key, value)| Ok((key.to_string(), interpolate(value, scope)?)))
        .collect()
}

/// OCI labels describing the image.
pub fn default_labels(created: &str, scope: &Value) -> Result<BTreeMap<String, String>> {
    let mut labels = interpolate_all(
        &[
            ("org.opencontainers.image.url", IMAGE_URL),
            ("org.opencontainers.image.authors", AUTHORS),
            ("org.opencontainers.image.documentation", DOCUMENTATION),
            ("org.opencontainers.image.source", SOURCE),
            ("org.opencontainers.image.version", "{odoo[version]}"),
            ("org.opencontainers.image.vendor", "LLacroix"),
            ("org.opencontainers.image.ref.name", "{odoo[ref]}"),
            ("org.opencontainers.image.title", "Odoo {odoo[version]}"),
            ("org.opencontainers.image.description", DESCRIPTION),
        ],
        scope,
    )?;
    // The date is a value, not a template.
    labels.insert(
        "org.opencontainers.image.created".to_string(),
        created.to_string(),
    );
    Ok(labels)
}

pub fn default_environments(scope: &Value) -> Result<BTreeMap<String, String>> {
    interpolate_all(ENVIRONMENTS, scope)
}
