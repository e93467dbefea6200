//! Update command - Merges new values into an interview.

use std::io::Write;

use super::write_json;
use crate::cli::args::UpdateArgs;
use crate::errors::AppResult;
use crate::services::ServiceContainer;

/// Execute the update command
pub async fn execute(
    args: UpdateArgs,
    services: &dyn ServiceContainer,
    out: &mut dyn Write,
) -> AppResult<()> {
    let fields = args.fields.into_fields(args.result);
    let interview = services.interviews().save_interview(&args.id, fields).await?;
    write_json(out, &interview)
}
