//! CLI command implementations.

pub mod check;
pub mod export_shell;
pub mod init;

use clap::Args;

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Where to write the config.
    #[arg(default_value = "ssr.toml")]
    pub path: String,

    /// Overwrite an existing file.
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Treat warnings as errors.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the export-shell command.
#[derive(Args)]
pub struct ExportShellArgs {
    /// Output file (default: stdout).
    #[arg(short, long)]
    pub out: Option<String>,

    /// Request cookie as `name=value` (repeatable).
    #[arg(long = "cookie")]
    pub cookies: Vec<String>,

    /// Locale preference (repeatable, overrides the config).
    #[arg(long = "locale")]
    pub locales: Vec<String>,
}
