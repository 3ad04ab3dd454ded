use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const ODOO14: &str = r#"{"odoo": {"version": "14.0", "ref": "14.0", "repo": "https://github.com/odoo/odoo.git", "release": "", "languages": "all"}}"#;

fn odoocker() -> Command {
    let mut cmd = Command::cargo_bin("odoocker").unwrap();
    cmd.env("CUR_DATE", "20220101");
    // Keep a user config out of the way.
    cmd.env("HOME", "/nonexistent-home");
    cmd
}

fn context_from_stdin(input: &str) -> String {
    let output = odoocker()
        .arg("context")
        .arg("--stdin")
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

fn render(context: &str) -> String {
    let output = odoocker()
        .arg("render")
        .write_stdin(context)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stdout));
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("odoocker").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage: odoocker"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("context"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("wkhtmltopdf"))
        .stdout(predicate::str::contains("platform"));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("odoocker").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("odoocker"));
}

#[test]
fn test_context_from_flags() {
    let output = odoocker()
        .arg("context")
        .arg("--odoo-version")
        .arg("14.0")
        .output()
        .unwrap();
    assert!(output.status.success());

    let ctx: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(ctx["os_version"], "focal");
    assert_eq!(ctx["python_bin"], "python3.8");
    assert_eq!(ctx["odoo"]["ref"], "14.0");
    assert_eq!(ctx["odoo"]["languages"], "all");
    assert_eq!(ctx["labels"]["org.opencontainers.image.created"], "20220101");
    assert!(!output.stdout.ends_with(b"\n"));
}

#[test]
fn test_context_from_stdin() {
    let ctx: Value = serde_json::from_str(&context_from_stdin(ODOO14)).unwrap();
    assert_eq!(ctx["os_version"], "focal");
    assert_eq!(ctx["python_bin"], "python3.8");
    assert_eq!(
        ctx["steps"],
        serde_json::json!([
            "setup_env",
            "setup_base_dependencies",
            "setup_odoo",
            "prepare_user",
            "setup_labels",
            "setup_command"
        ])
    );
    assert_eq!(ctx["user"]["uid"], "1000");
}

#[test]
fn test_context_is_idempotent() {
    assert_eq!(context_from_stdin(ODOO14), context_from_stdin(ODOO14));
}

#[test]
fn test_flags_win_over_stdin() {
    let output = odoocker()
        .arg("context")
        .arg("--stdin")
        .arg("--odoo-version")
        .arg("10.0")
        .write_stdin(ODOO14)
        .output()
        .unwrap();
    assert!(output.status.success());

    let ctx: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(ctx["python_bin"], "python2.7");
}

#[test]
fn test_context_from_service_file() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = temp_dir.path().join("odoo.toml");
    fs::write(
        &manifest,
        r#"
[services.prod]
odoo_version = "12.0"

[services.prod.odoo.repo]
url = "https://github.com/acme/odoo.git"
commit = "abc123"
"#,
    )
    .unwrap();

    let output = odoocker()
        .arg("context")
        .arg("--file")
        .arg(&manifest)
        .arg("--env")
        .arg("prod")
        .arg("--odoo-version")
        .arg("15.0")
        .output()
        .unwrap();
    assert!(output.status.success());

    let ctx: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(ctx["os_version"], "bionic");
    assert_eq!(ctx["python_bin"], "python3.6");
    assert_eq!(ctx["odoo"]["repo"], "https://github.com/acme/odoo.git");
    assert_eq!(ctx["labels"]["org.opencontainers.image.ref.name"], "abc123");
}

#[test]
fn test_service_file_unknown_env() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = temp_dir.path().join("odoo.toml");
    fs::write(&manifest, "[services.prod]\nodoo_version = \"12.0\"\n").unwrap();

    odoocker()
        .arg("context")
        .arg("-f")
        .arg(&manifest)
        .arg("-e")
        .arg("staging")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"error\":\"environment_not_found\""));
}

#[test]
fn test_missing_version_reports_json_error() {
    let output = odoocker().arg("context").output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let err: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(err["error"], "missing_version");
}

#[test]
fn test_unsupported_version() {
    odoocker()
        .arg("context")
        .arg("--odoo-version")
        .arg("16.0")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("unsupported_version"));
}

#[test]
fn test_render_builtin_templates() {
    let dockerfile = render(&context_from_stdin(ODOO14));

    assert!(!dockerfile.is_empty());
    assert_eq!(dockerfile.matches("FROM ubuntu:20.04").count(), 1);
    assert!(dockerfile.contains("LABEL org.opencontainers.image.title=\"Odoo 14.0\""));
    assert!(dockerfile.contains("ENV ODOO_RC=\"/etc/odoo/odoo.conf\""));
    assert!(dockerfile.contains("CMD [\"odoo\"]"));
}

#[test]
fn test_render_with_shadowed_step() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("setup_odoo.hbs"),
        "RUN echo custom setup for {{odoo.version}}",
    )
    .unwrap();

    let output = odoocker()
        .arg("context")
        .arg("--odoo-version")
        .arg("14.0")
        .arg("--template-dir")
        .arg(temp_dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let dockerfile = render(&String::from_utf8(output.stdout).unwrap());
    assert!(dockerfile.contains("RUN echo custom setup for 14.0"));
    assert!(!dockerfile.contains("git clone"));
}

#[test]
fn test_render_from_file_with_unknown_entry() {
    let temp_dir = TempDir::new().unwrap();
    let ctx_file = temp_dir.path().join("context.json");
    fs::write(&ctx_file, context_from_stdin(ODOO14)).unwrap();

    odoocker()
        .arg("render")
        .arg("--input")
        .arg(&ctx_file)
        .arg("--entry")
        .arg("nope")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("template_not_found"));
}

#[test]
fn test_render_invalid_context() {
    odoocker()
        .arg("render")
        .write_stdin("not json")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"error\":\"error\""));
}

#[test]
fn test_wkhtmltopdf_filter() {
    let ctx = context_from_stdin(ODOO14);

    let output = odoocker()
        .arg("wkhtmltopdf")
        .write_stdin(ctx)
        .output()
        .unwrap();
    assert!(output.status.success());

    let filtered: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(filtered["deb_files"][0]["name"], "wkhtmltox");
    assert_eq!(
        filtered["deb_files"][0]["url"],
        "https://github.com/wkhtmltopdf/packaging/releases/download/0.12.6-1/wkhtmltox_0.12.6-1.focal_amd64.deb"
    );

    let dockerfile = render(&String::from_utf8(output.stdout).unwrap());
    assert!(dockerfile.contains("/tmp/wkhtmltox.deb"));
}

#[test]
fn test_context_with_config_and_odbc() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.json");
    fs::write(&config, r#"{"pip_packages": ["odoo-tools"], "arch": "arm64"}"#).unwrap();

    let output = odoocker()
        .arg("context")
        .arg("--odoo-version")
        .arg("13.0")
        .arg("--config")
        .arg(&config)
        .arg("--with-odbc")
        .arg("--pip-package")
        .arg("phonenumbers")
        .output()
        .unwrap();
    assert!(output.status.success());

    let ctx: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(ctx["os_arch"], "arm64");
    assert_eq!(ctx["odoo_pip_packages"], serde_json::json!(["odoo-tools", "phonenumbers"]));
    assert_eq!(ctx["deb_repos"][1]["name"], "focal-microsoft");
}

#[test]
fn test_cur_date_wins_over_config_date() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.json");
    fs::write(&config, r#"{"created_date": "19990101"}"#).unwrap();

    let output = odoocker()
        .arg("context")
        .arg("--odoo-version")
        .arg("14.0")
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());

    let ctx: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(ctx["labels"]["org.opencontainers.image.created"], "20220101");
}

#[test]
fn test_render_keeps_selected_languages() {
    let output = odoocker()
        .arg("context")
        .arg("--odoo-version")
        .arg("14.0")
        .arg("--languages")
        .arg("fr_FR,en_US")
        .output()
        .unwrap();
    assert!(output.status.success());

    let dockerfile = render(&String::from_utf8(output.stdout).unwrap());
    assert!(dockerfile.contains("grep -v -E '/(fr_FR|en_US)\\.po$'"));
}

#[test]
fn test_platform_command() {
    odoocker()
        .arg("platform")
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("odoocker").unwrap();
    cmd.arg("invalid-command");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_verbose_flag() {
    odoocker()
        .arg("-v")
        .arg("context")
        .arg("--odoo-version")
        .arg("11.0")
        .assert()
        .success();
}
