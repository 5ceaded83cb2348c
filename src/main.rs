//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `redirect_audit` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use redirect_audit::app::{exceeds_threshold, run_check};
use redirect_audit::config::{CheckOpt, Command, Opt};
use redirect_audit::initialization::{init_analyzer, init_logger_with, init_store};
use redirect_audit::{start_server, AppState, Config};

/// Exit status when `--fail-on-issues` trips.
const EXIT_ISSUES_FOUND: i32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let result = match opt.command {
        Command::Serve(serve) => serve_command(Config::from(serve)).await,
        Command::Check(check) => check_command(&check).await,
    };

    if let Err(e) = result {
        eprintln!("redirect_audit error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn serve_command(config: Config) -> Result<()> {
    let analyzer = init_analyzer(&config)?;
    let store = init_store(&config).await?;
    let state = AppState::new(analyzer, Arc::new(store), &config);
    start_server(config.listen, state).await
}

async fn check_command(opt: &CheckOpt) -> Result<()> {
    let report = run_check(opt).await?;

    let json = if opt.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("Failed to serialize report")?;
    println!("{json}");

    if exceeds_threshold(&report.analyses, opt.fail_on_issues) {
        process::exit(EXIT_ISSUES_FOUND);
    }
    Ok(())
}
