// Extra apt repositories for binaries the distribution does not ship in a
// usable version, like a postgres client able to talk to a recent server.

use std::collections::BTreeMap;

use serde_json::Value;

use super::context::DebRepo;
use super::error::Result;
use super::interpolate::interpolate;

pub fn postgres_repo() -> DebRepo {
    DebRepo {
        name: "{os_version}-pgdg".to_string(),
        url: Some("https://apt.postgresql.org/pub/repos/apt/".to_string()),
        repo: Some("main".to_string()),
        key: Some("B97B0AFCAA1A47F044F244A07FCC7D46ACCC4CF8".to_string()),
        packages: vec!["postgresql-client".to_string()],
        ..Default::default()
    }
}

pub fn microsoft_odbc_repo() -> DebRepo {
    DebRepo {
        name: "{os_version}-microsoft".to_string(),
        key_url: Some("https://packages.microsoft.com/keys/microsoft.asc".to_string()),
        list_url: Some(
            "https://packages.microsoft.com/config/{os_name}/{os_release}/prod.list".to_string(),
        ),
        environments: BTreeMap::from([("ACCEPT_EULA".to_string(), "Y".to_string())]),
        packages: vec!["msodbcsql18".to_string()],
        ..Default::default()
    }
}

pub fn default_repos() -> Vec<DebRepo> {
    vec![postgres_repo()]
}

/// Interpolates the string fields of each repository against `scope`.
/// `environments` and `packages` are taken as is.
pub fn resolve_repos(repos: &[DebRepo], scope: &Value) -> Result<Vec<DebRepo>> {
    let field = |value: &Option<String>| -> Result<Option<String>> {
        value.as_deref().map(|v| interpolate(v, scope)).transpose()
    };

    repos
        .iter()
        .map(|repo| {
            Ok(DebRepo {
                name: interpolate(&repo.name, scope)?,
                url: field(&repo.url)?,
                repo: field(&repo.repo)?,
                key: field(&repo.key)?,
                key_url: field(&repo.key_url)?,
                list_url: field(&repo.list_url)?,
                environments: repo.environments.clone(),
                packages: repo.packages.clone(),
            })
        })
        .collect()
}
