//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use crate::domain::{InterviewFields, InterviewResult, Stage, Value};

/// Interview Tracker - keep track of job interviews per user
#[derive(Parser, Debug)]
#[command(name = "interview-tracker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Snapshot file backing the document store
    #[arg(short, long, global = true, env = "INTERVIEWS_DATA_FILE")]
    pub data: Option<PathBuf>,

    /// Signed-in user id
    #[arg(short, long, global = true, env = "INTERVIEWS_USER_ID")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List interviews, newest first
    List(ListArgs),

    /// Create an interview (result starts as Refusal)
    Add(AddArgs),

    /// Show one interview as JSON
    Show(ShowArgs),

    /// Update fields of an interview
    Update(UpdateArgs),

    /// Delete an interview
    Remove(RemoveArgs),
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only interviews with this result (e.g. Offer)
    #[arg(short, long)]
    pub result: Option<InterviewResult>,
}

/// Arguments for the add command
#[derive(Parser, Debug)]
pub struct AddArgs {
    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Interview id
    pub id: String,
}

/// Arguments for the update command
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Interview id
    pub id: String,

    /// New result (e.g. Offer)
    #[arg(short, long)]
    pub result: Option<InterviewResult>,

    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Arguments for the remove command
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Interview id
    pub id: String,
}

/// Interview fields shared by `add` and `update`. Omitted flags stay absent.
#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub vacancy_link: Option<String>,

    #[arg(long)]
    pub hr_name: Option<String>,

    #[arg(long)]
    pub telegram: Option<String>,

    #[arg(long)]
    pub whatsapp: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub salary_from: Option<i64>,

    #[arg(long)]
    pub salary_to: Option<i64>,

    /// Stage as NAME@RFC3339-DATE (repeatable)
    #[arg(long = "stage", value_parser = parse_stage)]
    pub stages: Vec<Stage>,

    /// Extra field as KEY=VALUE (repeatable)
    #[arg(long = "field", value_parser = parse_field)]
    pub extra: Vec<(String, Value)>,
}

impl FieldArgs {
    pub fn into_fields(self, result: Option<InterviewResult>) -> InterviewFields {
        InterviewFields {
            company: self.company,
            vacancy_link: self.vacancy_link,
            hr_name: self.hr_name,
            contact_telegram: self.telegram,
            contact_whatsapp: self.whatsapp,
            contact_phone: self.phone,
            salary_from: self.salary_from,
            salary_to: self.salary_to,
            stages: (!self.stages.is_empty()).then_some(self.stages),
            result,
            extra: self
                .extra
                .into_iter()
                .map(|(key, value)| (key, Some(value)))
                .collect(),
        }
    }
}

fn parse_stage(raw: &str) -> Result<Stage, String> {
    let (name, date) = raw
        .rsplit_once('@')
        .ok_or_else(|| format!("expected NAME@DATE, got `{}`", raw))?;
    let date = DateTime::parse_from_rfc3339(date.trim())
        .map_err(|e| format!("invalid stage date `{}`: {}", date, e))?;
    Ok(Stage::new(name.trim(), date.with_timezone(&Utc)))
}

fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err("field name must not be empty".to_string());
    }
    Ok((key.to_string(), Value::parse_literal(value)))
}
