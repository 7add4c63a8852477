//! `chorus login`

use clap::Args;
use dialoguer::Password;

use chorus_core::error::AppError;
use chorus_core::types::Credentials;
use chorus_service::SessionContext;

use crate::output;

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Login name
    #[arg(short, long)]
    pub username: String,

    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Execute the login command
pub async fn execute(args: &LoginArgs, ctx: &SessionContext) -> Result<(), AppError> {
    let password = match &args.password {
        Some(p) => p.clone(),
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::validation(format!("Failed to read password: {}", e)))?,
    };

    ctx.login(&Credentials::new(args.username.clone(), password))
        .await?;

    output::print_success(&format!("Logged in as {}", args.username));
    Ok(())
}
