// Host selection: which distribution and interpreter a given Odoo runs on.
//
// Older Odoo releases stay on the last distribution that was tested with them,
// even when a newer one could work, since newer distributions may lack or
// break some of their dependencies.

use log::debug;

use super::error::{Error, Result};
use super::version::OdooVersion;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub python_bin: String,
    pub os_name: String,
    pub os_version: String,
    pub os_release: String,
    pub os_arch: String,
}

struct Distro {
    codename: &'static str,
    release: &'static str,
}

const BIONIC: Distro = Distro {
    codename: "bionic",
    release: "18.04",
};

const FOCAL: Distro = Distro {
    codename: "focal",
    release: "20.04",
};

// (highest odoo major, distro, interpreter), ascending; first match wins.
const HOST_POLICY: &[(u32, &Distro, &str)] = &[
    (10, &BIONIC, "python2.7"),
    (12, &BIONIC, "python3.6"),
    (15, &FOCAL, "python3.8"),
];

pub fn host_config(version: &OdooVersion, arch: &str) -> Result<HostConfig> {
    let (_, distro, python_bin) = HOST_POLICY
        .iter()
        .find(|(max, _, _)| version.at_most(*max))
        .ok_or_else(|| Error::UnsupportedVersion {
            version: version.to_string(),
        })?;

    debug!(
        "Odoo {} runs on ubuntu {} with {}",
        version, distro.codename, python_bin
    );

    Ok(HostConfig {
        python_bin: python_bin.to_string(),
        os_name: "ubuntu".to_string(),
        os_version: distro.codename.to_string(),
        os_release: distro.release.to_string(),
        os_arch: arch.to_string(),
    })
}

/// Major version of a `pythonX[.Y]` interpreter name.
pub fn python_major(python_bin: &str) -> Result<u32> {
    python_bin
        .strip_prefix("python")
        .and_then(|v| v.split('.').next())
        .and_then(|major| major.parse().ok())
        .ok_or_else(|| Error::InvalidPython {
            python_bin: python_bin.to_string(),
        })
}
