//! `chorus logout`

use chorus_core::error::AppError;
use chorus_service::SessionContext;

use crate::output;

/// Execute the logout command
pub fn execute(ctx: &SessionContext) -> Result<(), AppError> {
    ctx.logout()?;
    output::print_success("Logged out");
    Ok(())
}
