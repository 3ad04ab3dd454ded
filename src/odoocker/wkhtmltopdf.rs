// Context filter adding the patched wkhtmltopdf build Odoo needs for reports.

use log::debug;

use super::context::{BuildContext, DebFile};

pub const DEFAULT_VERSION: &str = "0.12.6-1";
const BASE_URL: &str = "https://github.com/wkhtmltopdf/packaging/releases/download";

pub fn package_url(version: &str, os_version: &str, os_arch: &str) -> String {
    format!(
        "{}/{}/wkhtmltox_{}.{}_{}.deb",
        BASE_URL, version, version, os_version, os_arch
    )
}

pub fn add_wkhtmltopdf(ctx: &mut BuildContext, version: &str) {
    let url = package_url(version, &ctx.os_version, &ctx.os_arch);
    debug!("Adding wkhtmltopdf package {}", url);
    ctx.deb_files.push(DebFile {
        url,
        name: "wkhtmltox".to_string(),
    });
}
