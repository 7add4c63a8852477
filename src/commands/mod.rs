//! CLI command definitions and dispatch.

pub mod access;
pub mod login;
pub mod logout;
pub mod status;

use clap::{Parser, Subcommand};

use chorus_core::config::AppConfig;
use chorus_core::error::AppError;
use chorus_service::SessionContext;

use crate::output::OutputFormat;

/// Chorus: choir portal session client
#[derive(Debug, Parser)]
#[command(name = "chorus", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Keep the token in memory only; nothing survives the process
    #[arg(long)]
    pub ephemeral: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Exchange credentials for a token and store it
    Login(login::LoginArgs),
    /// Remove the stored token and cached data
    Logout,
    /// Show the session flags
    Status,
    /// Show which sections the logged-in user may open
    Access,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        let ctx = if self.ephemeral {
            SessionContext::ephemeral(config)?
        } else {
            SessionContext::new(config)?
        };

        match &self.command {
            Commands::Login(args) => login::execute(args, &ctx).await,
            Commands::Logout => logout::execute(&ctx),
            Commands::Status => status::execute(&ctx, self.format),
            Commands::Access => access::execute(&ctx, self.format).await,
        }
    }
}
