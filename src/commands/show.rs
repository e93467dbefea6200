//! Show command - Prints one interview as JSON.

use std::io::Write;

use super::write_json;
use crate::cli::args::ShowArgs;
use crate::errors::AppResult;
use crate::services::ServiceContainer;

/// Execute the show command
pub async fn execute(
    args: ShowArgs,
    services: &dyn ServiceContainer,
    out: &mut dyn Write,
) -> AppResult<()> {
    let interview = services.interviews().get_interview_by_id(&args.id).await?;
    write_json(out, &interview)
}
