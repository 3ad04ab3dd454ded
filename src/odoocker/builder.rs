// Derives a complete BuildContext from caller overrides.
//
// The resulting context can be piped through any filter before rendering,
// e.g. `odoocker context ... | ./add_packages | odoocker render`, to extend the
// image without adding layers on top of a common one.

use log::debug;

use super::config::BuilderConfig;
use super::context::{BuildContext, OdooOverrides, Overrides, COMPUTED_KEYS};
use super::error::Result;
use super::host::host_config;
use super::version::OdooVersion;
use super::{metadata, packages, repos};

pub fn make_context(overrides: Overrides, config: &BuilderConfig) -> Result<BuildContext> {
    let Overrides {
        odoo,
        user,
        deb_files,
        template_dirs,
        mut extra,
    } = overrides;

    let odoo = odoo.resolve()?;
    let host = host_config(&odoo.version, &config.arch)?;

    let dropped: Vec<String> = extra
        .keys()
        .filter(|k| COMPUTED_KEYS.contains(&k.as_str()))
        .cloned()
        .collect();
    if !dropped.is_empty() {
        debug!("Recomputing caller supplied keys: {:?}", dropped);
        extra.retain(|k, _| !COMPUTED_KEYS.contains(&k.as_str()));
    }

    let mut ctx = BuildContext {
        odoo,
        python_bin: host.python_bin.clone(),
        os_name: host.os_name.clone(),
        os_version: host.os_version.clone(),
        os_release: host.os_release.clone(),
        os_arch: host.os_arch.clone(),
        base_packages: Vec::new(),
        odoo_packages: Vec::new(),
        odoo_pip_packages: Vec::new(),
        deb_repos: Vec::new(),
        steps: Vec::new(),
        labels: Default::default(),
        environments: Default::default(),
        user: user.unwrap_or_default(),
        deb_files,
        template_dirs,
        extra,
    };

    // Interpolation sees everything resolved so far, host config included.
    let scope = serde_json::to_value(&ctx)?;

    ctx.deb_repos = repos::resolve_repos(&config.deb_repos, &scope)?;
    ctx.base_packages = packages::base_packages(&ctx.odoo.version);
    ctx.base_packages.extend(packages::python_packages(&host)?);
    ctx.steps = metadata::setup_steps();
    ctx.odoo_pip_packages = packages::odoo_pip_packages(config, &host)?;
    ctx.odoo_packages = packages::odoo_packages(&host);

    let created = match &config.created_date {
        Some(date) => date.clone(),
        None => metadata::current_date(),
    };
    ctx.labels = metadata::default_labels(&created, &scope)?;
    ctx.environments = metadata::default_environments(&scope)?;

    debug!(
        "Built context for odoo {} with {} base packages and {} steps",
        ctx.odoo.version,
        ctx.base_packages.len(),
        ctx.steps.len()
    );
    Ok(ctx)
}

/// Overrides carrying only an odoo version.
#[cfg(test)]
pub fn version_overrides(version: &str) -> Result<Overrides> {
    Ok(Overrides {
        odoo: OdooOverrides {
            version: Some(OdooVersion::parse(version)?),
            ..Default::default()
        },
        ..Default::default()
    })
}
