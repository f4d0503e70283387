//! SSR CLI - Command line tool for the server-side rendering pipeline.
//!
//! Commands:
//! - `ssr init` - Write a starter site configuration
//! - `ssr check` - Validate the site configuration
//! - `ssr export-shell` - Render the static shell page to a file

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{CheckArgs, ExportShellArgs, InitArgs};

/// SSR CLI - Check site configuration and export the static shell page
#[derive(Parser)]
#[command(name = "ssr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter ssr.toml
    Init(InitArgs),

    /// Validate routes, basename and asset entries
    Check(CheckArgs),

    /// Render the static shell page
    ExportShell(ExportShellArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "ssr=debug" } else { "ssr=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;
    tracing::debug!(target: "ssr", config = ?ctx.config_path, cwd = %ctx.cwd.display(), "context loaded");

    // Execute command
    let result = match cli.command {
        Commands::Init(args) => commands::init::run(args, &ctx).await,
        Commands::Check(args) => commands::check::run(args, &ctx).await,
        Commands::ExportShell(args) => commands::export_shell::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
