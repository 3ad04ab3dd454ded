use super::config::BuilderConfig;
use super::error::Result;
use super::host::{python_major, HostConfig};
use super::version::OdooVersion;

const CORE_PACKAGES: &[&str] = &[
    "curl",
    "libpq-dev",
    "libsasl2-2",
    "libldap-2.4-2",
    "libxml2",
    "libxmlsec1",
    "libxslt1.1",
    "sudo",
    "node-less",
    "gnupg",
    "ca-certificates",
];

// Odoo < 11 still compiles its stylesheets with sass and needs libjpeg headers.
const LEGACY_PACKAGES: &[&str] = &["ruby-sass", "libjpeg-dev"];

// pathlib is only in the standard library from python 3.
const PATHLIB2: &str = "pathlib2";

const PYTHON3_PACKAGES: &[&str] = &[
    "python3-wheel",
    "python3-setuptools",
    "python3-pip",
    "python3-cryptography",
];

const PYTHON2_PACKAGES: &[&str] = &[
    "python-wheel",
    "python-setuptools",
    "python-pip",
    "python-cryptography",
    "libpython2.7",
];

const BUILD_PACKAGES: &[&str] = &[
    "build-essential",
    "libsasl2-dev",
    "libldap2-dev",
    "libxml2-dev",
    "libxmlsec1-dev",
    "libxslt1-dev",
    "git",
];

fn owned(packages: &[&str]) -> Vec<String> {
    packages.iter().map(|p| p.to_string()).collect()
}

/// Native libraries needed at runtime by the given Odoo version.
pub fn base_packages(version: &OdooVersion) -> Vec<String> {
    let mut packages = owned(CORE_PACKAGES);
    if version.below(11) {
        packages.extend(owned(LEGACY_PACKAGES));
    }
    packages
}

/// The interpreter and the distribution python tooling matching its major version.
pub fn python_packages(host: &HostConfig) -> Result<Vec<String>> {
    let mut packages = vec![host.python_bin.clone()];
    if python_major(&host.python_bin)? >= 3 {
        packages.extend(owned(PYTHON3_PACKAGES));
    } else {
        packages.extend(owned(PYTHON2_PACKAGES));
    }
    Ok(packages)
}

/// Packages only needed while Odoo and its python dependencies are built.
/// They are purged in the same layer once Odoo is installed.
pub fn odoo_packages(host: &HostConfig) -> Vec<String> {
    let mut packages = owned(BUILD_PACKAGES);
    packages.push(format!("{}-dev", host.python_bin));
    packages
}

/// Configured pip packages, plus the pathlib backport on python 2 hosts.
pub fn odoo_pip_packages(config: &BuilderConfig, host: &HostConfig) -> Result<Vec<String>> {
    let mut packages = config.pip_packages.clone();
    if python_major(&host.python_bin)? < 3 && !packages.iter().any(|p| p == PATHLIB2) {
        packages.push(PATHLIB2.to_string());
    }
    Ok(packages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odoocker::host::host_config;

    fn version(v: &str) -> OdooVersion {
        OdooVersion::parse(v).unwrap()
    }

    #[test]
    fn test_legacy_packages_below_11() {
        for v in ["8.0", "9.0", "10.0"] {
            let packages = base_packages(&version(v));
            assert!(packages.contains(&"ruby-sass".to_string()));
            assert!(packages.contains(&"libjpeg-dev".to_string()));
        }
    }

    #[test]
    fn test_no_legacy_packages_from_11() {
        for v in ["11.0", "12.0", "14.0", "15.0"] {
            let packages = base_packages(&version(v));
            assert!(!packages.contains(&"ruby-sass".to_string()));
            assert!(!packages.contains(&"libjpeg-dev".to_string()));
            assert_eq!(packages.len(), CORE_PACKAGES.len());
        }
    }

    #[test]
    fn test_legacy_packages_are_appended_after_core() {
        let packages = base_packages(&version("10.0"));
        assert_eq!(packages[0], "curl");
        assert_eq!(packages[packages.len() - 2..], ["ruby-sass", "libjpeg-dev"]);
    }

    #[test]
    fn test_python3_packages() {
        let host = host_config(&version("14.0"), "amd64").unwrap();
        let packages = python_packages(&host).unwrap();
        assert_eq!(packages[0], "python3.8");
        assert!(packages.contains(&"python3-pip".to_string()));
        assert!(!packages.contains(&"libpython2.7".to_string()));
    }

    #[test]
    fn test_python2_packages() {
        let host = host_config(&version("10.0"), "amd64").unwrap();
        let packages = python_packages(&host).unwrap();
        assert_eq!(packages[0], "python2.7");
        assert!(packages.contains(&"python-pip".to_string()));
        assert!(packages.contains(&"libpython2.7".to_string()));
    }

    #[test]
    fn test_odoo_packages_include_python_headers() {
        let host = host_config(&version("12.0"), "amd64").unwrap();
        let packages = odoo_packages(&host);
        assert_eq!(packages.last().unwrap(), "python3.6-dev");
        assert_eq!(packages[0], "build-essential");
    }

    #[test]
    fn test_pip_packages_follow_config() {
        let host = host_config(&version("14.0"), "amd64").unwrap();
        assert!(odoo_pip_packages(&BuilderConfig::default(), &host)
            .unwrap()
            .is_empty());

        let config = BuilderConfig {
            pip_packages: vec!["odoo-tools".to_string()],
            ..Default::default()
        };
        assert_eq!(
            odoo_pip_packages(&config, &host).unwrap(),
            vec!["odoo-tools".to_string()]
        );
    }

    #[test]
    fn test_python2_pip_packages_add_pathlib2() {
        let host = host_config(&version("10.0"), "amd64").unwrap();
        let config = BuilderConfig {
            pip_packages: vec!["odoo-tools".to_string()],
            ..Default::default()
        };
        assert_eq!(
            odoo_pip_packages(&config, &host).unwrap(),
            vec!["odoo-tools".to_string(), "pathlib2".to_string()]
        );
        assert_eq!(
            odoo_pip_packages(&BuilderConfig::default(), &host).unwrap(),
            vec!["pathlib2".to_string()]
        );

        let config = BuilderConfig {
            pip_packages: vec!["pathlib2".to_string()],
            ..Default::default()
        };
        assert_eq!(odoo_pip_packages(&config, &host).unwrap().len(), 1);
    }
}
