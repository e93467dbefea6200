//! Commands module - CLI command implementations.
//!
//! Each command is implemented in its own module for separation of concerns.
//! Commands write their report to the given writer; logs go to stderr.

pub mod add;
pub mod list;
pub mod remove;
pub mod show;
pub mod update;

use std::io::Write;

use crate::cli::Commands;
use crate::config::Config;
use crate::domain::Interview;
use crate::errors::AppResult;
use crate::services::{ServiceContainer, Services};

/// Build the services from config and dispatch one command
pub async fn run(command: Commands, config: &Config, out: &mut dyn Write) -> AppResult<()> {
    let services = Services::from_config(config).await?;
    dispatch(command, &services, out).await
}

/// Dispatch one command against an existing container
pub async fn dispatch(
    command: Commands,
    services: &dyn ServiceContainer,
    out: &mut dyn Write,
) -> AppResult<()> {
    match command {
        Commands::List(args) => list::execute(args, services, out).await,
        Commands::Add(args) => add::execute(args, services, out).await,
        Commands::Show(args) => show::execute(args, services, out).await,
        Commands::Update(args) => update::execute(args, services, out).await,
        Commands::Remove(args) => remove::execute(args, services, out).await,
    }
}

/// One-line summary: id, creation date, result, company
pub(crate) fn summary_line(interview: &Interview) -> String {
    format!(
        "{}  {}  {:<8}  {}",
        interview.id,
        interview.created_at.format("%Y-%m-%d %H:%M"),
        interview
            .result
            .as_ref()
            .map(|r| r.as_str())
            .unwrap_or("-"),
        interview.company.as_deref().unwrap_or("-"),
    )
}

pub(crate) fn write_json(out: &mut dyn Write, interview: &Interview) -> AppResult<()> {
    let json = serde_json::to_string_pretty(&interview.to_json())?;
    writeln!(out, "{}", json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use clap::Parser;

    use super::*;
    use crate::cli::Cli;
    use crate::infra::{DocumentStore, HistoryNavigator, MemoryStore, StaticSession};
    use crate::services::{InterviewManager, MockServiceContainer};

    fn container(store: Arc<dyn DocumentStore>) -> MockServiceContainer {
        let mut services = MockServiceContainer::new();
        services.expect_interviews().returning(move || {
            Arc::new(InterviewManager::new(
                store.clone(),
                Arc::new(StaticSession::signed_in("u1")),
                Arc::new(HistoryNavigator::new()),
            ))
        });
        services
    }

    async fn run_args(services: &MockServiceContainer, argv: &[&str]) -> AppResult<String> {
        let cli = Cli::parse_from(std::iter::once("interview-tracker").chain(argv.iter().copied()));
        let mut out = Vec::new();
        dispatch(cli.command, services, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_add_update_list_remove() {
        let services = container(Arc::new(MemoryStore::new()));

        let id = run_args(&services, &["add", "--company", "Acme"]).await.unwrap();
        let id = id.trim().to_string();

        let listed = run_args(&services, &["list"]).await.unwrap();
        assert!(listed.contains(&id));
        assert!(listed.contains("Refusal"));
        assert!(listed.contains("Acme"));

        let offers = run_args(&services, &["list", "--result", "Offer"]).await.unwrap();
        assert!(offers.is_empty());

        let updated = run_args(&services, &["update", id.as_str(), "--result", "Offer"]).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&updated).unwrap();
        assert_eq!(json["result"], "Offer");
        assert_eq!(json["company"], "Acme");

        let offers = run_args(&services, &["list", "--result", "Offer"]).await.unwrap();
        assert_eq!(offers.lines().count(), 1);

        let removed = run_args(&services, &["remove", id.as_str()]).await.unwrap();
        assert_eq!(removed.trim(), "0 interview(s) left");
    }

    #[tokio::test]
    async fn test_show_missing_is_not_found() {
        let services = container(Arc::new(MemoryStore::new()));
        let err = run_args(&services, &["show", "ghost"]).await.unwrap_err();
        assert!(matches!(err, crate::errors::AppError::NotFound));
    }

    #[tokio::test]
    async fn test_show_renders_stage_dates() {
        let services = container(Arc::new(MemoryStore::new()));
        let id = run_args(
            &services,
            &["add", "--stage", "onsite@2024-05-01T10:00:00Z"],
        )
        .await
        .unwrap();

        let shown = run_args(&services, &["show", id.trim()]).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&shown).unwrap();
        assert_eq!(json["stages"][0]["date"], "2024-05-01T10:00:00Z");
        assert_eq!(json["stages"][0]["name"], "onsite");
    }
}
