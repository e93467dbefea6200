//! Add command - Creates an interview.

use std::io::Write;

use crate::cli::args::AddArgs;
use crate::errors::AppResult;
use crate::services::ServiceContainer;

/// Execute the add command
pub async fn execute(
    args: AddArgs,
    services: &dyn ServiceContainer,
    out: &mut dyn Write,
) -> AppResult<()> {
    let interview = services
        .interviews()
        .add_new_interview(args.fields.into_fields(None))
        .await?;

    writeln!(out, "{}", interview.id)?;
    Ok(())
}
