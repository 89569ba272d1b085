use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::OutputFormat;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Write the calendar of upcoming blocker reviews for the current level.
    Blockers(FeedArgs),
    /// Write the calendar of daily review counts.
    Reviews(FeedArgs),
    /// Show radical and kanji progress at the current level.
    Progress(ProgressArgs),
    /// Serve calendar feeds over HTTP.
    Serve(ServeArgs),
}

/// Learner selection shared by every per-learner command.
#[derive(Clone, Debug, Args)]
pub struct KeyArgs {
    /// Learner API key
    #[arg(long, env = "WKCAL_API_KEY", hide_env_values = true)]
    pub api_key: String,
}

#[derive(Clone, Debug, Args)]
pub struct FeedArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    /// Write the .ics file here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct ProgressArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    /// Output format: json, table
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Bind host (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides server.port)
    #[arg(short, long)]
    pub port: Option<u16>,
}
