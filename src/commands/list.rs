//! List command - Prints interviews, newest first.

use std::io::Write;

use super::summary_line;
use crate::cli::args::ListArgs;
use crate::errors::AppResult;
use crate::services::ServiceContainer;

/// Execute the list command
pub async fn execute(
    args: ListArgs,
    services: &dyn ServiceContainer,
    out: &mut dyn Write,
) -> AppResult<()> {
    let interviews = services.interviews();

    match args.result {
        Some(result) => {
            interviews.set_selected_filter_result(Some(result));
            interviews.submit_filter().await?;
        }
        None => interviews.clear_filter().await?,
    }

    let listed = interviews.interviews();
    for interview in &listed {
        writeln!(out, "{}", summary_line(interview))?;
    }
    tracing::debug!(count = listed.len(), "Interviews printed");

    Ok(())
}
