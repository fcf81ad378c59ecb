//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `adstack_audit` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Report rendering and the exit code policy
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use adstack_audit::initialization::init_logger_with;
use adstack_audit::{render_json, render_text, run_audit, Config, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists), e.g. RUST_LOG
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

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let output = config.output;
    let fail_on = config.fail_on;

    match run_audit(config).await {
        Ok(report) => {
            match output {
                OutputFormat::Text => print!("{}", render_text(&report)),
                OutputFormat::Json => {
                    println!("{}", render_json(&report).context("Failed to render report")?)
                }
            }
            log::info!("Audit finished in {:.2}s", report.elapsed_seconds);
            let code = fail_on.exit_code(report.verdict.overall_status);
            if code != 0 {
                process::exit(code);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ adstack_audit error: {:#}", e);
            process::exit(1);
        }
    }
}
