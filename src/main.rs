//! pho main entry point
//!
//! This is the command-line interface for the pho gallery scraper.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use pho::config::resolve_config;
use pho::crawler::walker_from_config;
use pho::visitor::{DiffVisitor, FetchVisitor, ListVisitor, Visitor};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// pho: a scraper for photo gallery 3 galleries
///
/// pho walks the album tree served under the gallery's album prefix. It can
/// list the tree, report what is missing locally, or mirror the images.
#[derive(Parser, Debug)]
#[command(name = "pho")]
#[command(version)]
#[command(about = "scraper for photo gallery 3 galleries", long_about = None)]
struct Cli {
    /// Base url to the photo gallery
    #[arg(long, env = "PHOTO_GALLERY_URL", global = true)]
    url: Option<String>,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log traversal details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the remote tree: pho ls [path]
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        walk: WalkArgs,

        /// Remote path to start from
        remote_path: Option<String>,
    },

    /// Print remote nodes missing locally: pho diff [remote path] [local path]
    Diff {
        #[command(flatten)]
        walk: WalkArgs,

        /// Remote path to start from
        #[arg(default_value = "/")]
        remote_path: String,

        /// Local mirror to compare against
        #[arg(default_value = ".")]
        local_path: PathBuf,
    },

    /// Download missing images: pho fetch [remote path] [local path]
    Fetch {
        #[command(flatten)]
        walk: WalkArgs,

        /// Remote path to start from
        #[arg(default_value = "/")]
        remote_path: String,

        /// Local mirror to download into
        #[arg(default_value = ".")]
        local_path: PathBuf,
    },
}

#[derive(Args, Debug)]
struct WalkArgs {
    /// Will recursively walk the gallery
    #[arg(short, long)]
    recurse: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    exit_status(run(cli).await)
}

/// Reports the command's outcome once, through the logger
fn exit_status(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity
///
/// `RUST_LOG` takes precedence when set. Logs go to stderr so command output
/// on stdout stays clean.
fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("pho=debug,info")
        } else {
            EnvFilter::new("pho=info,warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli.config.as_deref(), cli.url)?;

    match cli.command {
        Command::List { walk, remote_path } => {
            let remote_path = remote_path.unwrap_or_default();
            let mut visitor = ListVisitor::new(io::stdout().lock());
            handle_walk(&config, walk, &remote_path, &mut visitor).await
        }
        Command::Diff {
            walk,
            remote_path,
            local_path,
        } => {
            let mut visitor = DiffVisitor::new(local_path, io::stdout().lock());
            handle_walk(&config, walk, &remote_path, &mut visitor).await
        }
        Command::Fetch {
            walk,
            remote_path,
            local_path,
        } => {
            let mut visitor = FetchVisitor::new(local_path, io::stdout().lock());
            handle_walk(&config, walk, &remote_path, &mut visitor).await
        }
    }
}

/// Runs one walk from `remote_path` with the command's visitor
async fn handle_walk<V: Visitor>(
    config: &pho::Config,
    walk: WalkArgs,
    remote_path: &str,
    visitor: &mut V,
) -> anyhow::Result<()> {
    let walker = walker_from_config(config, walk.recurse)?;

    tracing::debug!(
        "Walking {} (recurse: {})",
        if remote_path.is_empty() { "/" } else { remote_path },
        walk.recurse
    );

    walker
        .walk(remote_path, visitor)
        .await
        .with_context(|| format!("walk of '{}' failed", remote_path))
}
