//! Remove command - Deletes an interview.

use std::io::Write;

use crate::cli::args::RemoveArgs;
use crate::errors::AppResult;
use crate::services::ServiceContainer;

/// Execute the remove command
pub async fn execute(
    args: RemoveArgs,
    services: &dyn ServiceContainer,
    out: &mut dyn Write,
) -> AppResult<()> {
    let interviews = services.interviews();
    interviews.remove_interview(&args.id).await?;

    writeln!(out, "{} interview(s) left", interviews.interviews().len())?;
    Ok(())
}
