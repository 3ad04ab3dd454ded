mod odoocker;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use odoocker::builder::make_context;
use odoocker::config::BuilderConfig;
use odoocker::context::{BuildContext, DEFAULT_LANGUAGES, DEFAULT_REPO};
use odoocker::inputs::{self, Input, SourceFlags};
use odoocker::manifest::ServiceManifests;
use odoocker::{platform, render, repos, utils, wkhtmltopdf};

#[derive(Debug, Args)]
struct ContextOpts {
    /// Odoo version, e.g. 14.0
    #[arg(long = "odoo-version", short = 'o')]
    odoo_version: Option<String>,

    /// Git commit reference. Defaults to the version when no release is given.
    #[arg(long = "ref")]
    git_ref: Option<String>,

    /// Odoo nightly release from https://nightly.odoo.com (e.g. 20220101)
    #[arg(long)]
    release: Option<String>,

    #[arg(long, default_value = DEFAULT_REPO)]
    repo: String,

    /// Languages to keep, as a csv value
    #[arg(long, default_value = DEFAULT_LANGUAGES)]
    languages: String,

    /// Service manifest file
    #[arg(long, short, requires = "env")]
    file: Option<PathBuf>,

    /// Environment of the service manifest to use
    #[arg(long, short, requires = "file")]
    env: Option<String>,

    /// Read the override context as JSON from stdin
    #[arg(long)]
    stdin: bool,

    /// Builder config file (JSON)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Add the Microsoft ODBC apt repository
    #[arg(long)]
    with_odbc: bool,

    /// Extra package installed with pip (repeatable)
    #[arg(long = "pip-package")]
    pip_packages: Vec<String>,

    /// Template directory searched before the built-in templates (repeatable)
    #[arg(long = "template-dir")]
    template_dirs: Vec<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[clap(
        name = "context",
        about = "Build the JSON context describing the image."
    )]
    Context {
        #[clap(flatten)]
        args: ContextOpts,
    },

    #[clap(name = "render", about = "Render a JSON context into a Dockerfile.")]
    Render {
        /// Read the context from this file instead of stdin
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Entry template name
        #[arg(long)]
        entry: Option<String>,
    },

    #[clap(
        name = "wkhtmltopdf",
        about = "Add the wkhtmltopdf package to a JSON context read from stdin."
    )]
    Wkhtmltopdf {
        #[arg(long = "package-version", default_value = wkhtmltopdf::DEFAULT_VERSION)]
        package_version: String,
    },

    #[clap(name = "platform", about = "Print the docker architecture of this host.")]
    Platform,
}

#[derive(Parser)]
#[command(name = "odoocker")]
#[command(about = "Build contexts and Dockerfiles for Odoo images.", long_about = None)]
#[command(version)]
pub struct App {
    /// Log debug information to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // stdout carries the data, logs go to stderr.
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn build_context(args: ContextOpts) -> Result<BuildContext> {
    let mut config = BuilderConfig::discover(args.config.as_deref())?;
    if args.with_odbc {
        config.deb_repos.push(repos::microsoft_odbc_repo());
    }
    config.pip_packages.extend(args.pip_packages);

    let flags = SourceFlags {
        version: args.odoo_version,
        git_ref: args.git_ref,
        release: args.release,
        repo: args.repo,
        languages: args.languages,
    };

    let mut overrides = match Input::select(flags, args.file, args.env, args.stdin) {
        Input::Service { file, env, flags } => {
            debug!("Reading service {} from {}", env, file.display());
            let manifests = ServiceManifests::load(&file)?;
            inputs::from_service(&manifests, &env, flags)?
        }
        Input::Flags(flags) => inputs::from_flags(flags)?,
        Input::Stdin => {
            debug!("Reading override context from stdin");
            utils::read_json(io::stdin())?
        }
    };
    overrides.template_dirs.extend(args.template_dirs);

    Ok(make_context(overrides, &config)?)
}

fn run(app: App) -> Result<()> {
    match app.command {
        Command::Context { args } => {
            let ctx = build_context(args).context("Failed to build context")?;
            utils::write_json(io::stdout(), &ctx)?;
        }
        Command::Render { input, entry } => {
            let ctx: BuildContext = match input {
                Some(path) => utils::read_json_file(&path)?,
                None => utils::read_json(io::stdin())?,
            };
            let dockerfile = match entry {
                Some(entry) => render::render_entry(&ctx, &entry)?,
                None => render::render(&ctx)?,
            };
            utils::write_text(io::stdout(), &dockerfile)?;
        }
        Command::Wkhtmltopdf { package_version } => {
            let mut ctx: BuildContext = utils::read_json(io::stdin())?;
            wkhtmltopdf::add_wkhtmltopdf(&mut ctx, &package_version);
            utils::write_json(io::stdout(), &ctx)?;
        }
        Command::Platform => {
            utils::write_text(io::stdout(), &platform::host_arch())?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let app = App::parse();
    init_logging(app.verbose);

    match run(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{:#}", err);
            let _ = utils::write_json(io::stdout(), &utils::error_payload(&err));
            ExitCode::from(1)
        }
    }
}
