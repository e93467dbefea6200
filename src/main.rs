//! Interview Tracker - Application entry point
//!
//! CLI-based entry point that dispatches to the interview commands.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use interview_tracker::{
    cli::Cli,
    commands,
    config::Config,
};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    // Load configuration, command-line flags win over the environment
    let config = Config::from_env().with_overrides(cli.data, cli.user);
    tracing::debug!(?config, "Configuration loaded");

    // Execute command
    let mut stdout = std::io::stdout();
    let result = commands::run(cli.command, &config, &mut stdout).await;

    // Handle errors
    if let Err(e) = result {
        tracing::error!("Command failed: {}", e.detail());
        eprintln!("error [{}]: {}", e.code(), e.detail());
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber; logs go to stderr so command output stays clean
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
