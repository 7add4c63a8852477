//! `chorus access`

use serde::Serialize;
use tabled::Tabled;

use chorus_core::error::AppError;
use chorus_service::SessionContext;

use crate::output::{self, OutputFormat};

/// Capability display row
#[derive(Debug, Serialize, Tabled)]
struct AccessRow {
    /// Avatar initials
    user: String,
    /// Role tier
    role: String,
    profile: bool,
    choir_statistics: bool,
    personal_statistics: bool,
    penalties: bool,
    youth_section: bool,
}

/// Execute the access command
pub async fn execute(ctx: &SessionContext, format: OutputFormat) -> Result<(), AppError> {
    let Some(profile) = ctx.current_user().await? else {
        return Err(AppError::authentication("Not logged in"));
    };
    let caps = ctx.capabilities().await?;

    let row = AccessRow {
        user: profile.initials().unwrap_or_else(|| "-".to_string()),
        role: profile.user_status.to_string(),
        profile: caps.profile,
        choir_statistics: caps.choir_statistics,
        personal_statistics: caps.personal_statistics,
        penalties: caps.penalties,
        youth_section: caps.youth_section,
    };

    output::print_record(&row, format);
    Ok(())
}
