//! labelsync: converge GitHub issue labels to a YAML desired state.
//!
//! # Usage
//!
//! ```text
//! labelsync --token <TOKEN> [--config labels.yml] [--org <name>]... [--dry-run]
//! ```
//!
//! Logs go to stderr (`RUST_LOG` overrides the `info` default); the run
//! report goes to stdout.

mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use labelsync_core::{config, OrgName};
use labelsync_github::{GitHubClient, DEFAULT_API_URL};
use labelsync_sync::{
    pipeline::{self, SyncScope},
    SyncOptions,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "labelsync",
    version,
    about = "Synchronize issue labels across organization repositories",
    long_about = None,
)]
struct Cli {
    /// Path to the label config file.
    #[arg(long, value_name = "PATH", default_value = "labels.yml")]
    config: PathBuf,

    /// GitHub access token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Only sync these organizations (repeatable). Defaults to every configured one.
    #[arg(long = "org", value_name = "NAME")]
    orgs: Vec<String>,

    /// Show what would change without creating, editing or deleting labels.
    #[arg(long)]
    dry_run: bool,

    /// GitHub REST API root, e.g. for GitHub Enterprise.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

impl Cli {
    fn scope(&self) -> SyncScope {
        if self.orgs.is_empty() {
            SyncScope::All
        } else {
            SyncScope::Organizations(self.orgs.iter().map(|o| OrgName::from(o.as_str())).collect())
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let state = config::load(&cli.config).context("could not load label config")?;
    if state.is_empty() {
        println!("No organizations configured in {}.", cli.config.display());
        return Ok(());
    }

    let scope = cli.scope();
    let options = SyncOptions {
        dry_run: cli.dry_run,
    };
    let mut client = GitHubClient::with_base_url(cli.token, cli.api_url);
    tracing::debug!(api = client.base_url(), ?scope, dry_run = options.dry_run, "starting sync");

    let report = pipeline::run(&state, &mut client, scope, options)?;
    report::print(&report);
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
