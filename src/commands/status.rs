//! `chorus status`

use serde::Serialize;
use tabled::Tabled;

use chorus_core::error::AppError;
use chorus_service::SessionContext;

use crate::output::{self, OutputFormat};

/// Session display row
#[derive(Debug, Serialize, Tabled)]
struct StatusRow {
    /// Derived state
    state: String,
    /// Token present
    logged: bool,
    /// Login in flight
    loading: bool,
    /// Last attempt failed
    error: bool,
}

/// Execute the status command
pub fn execute(ctx: &SessionContext, format: OutputFormat) -> Result<(), AppError> {
    let session = ctx.controller().session();

    let row = StatusRow {
        state: session.state().to_string(),
        logged: session.is_logged,
        loading: session.loading,
        error: session.error,
    };

    output::print_record(&row, format);
    Ok(())
}
