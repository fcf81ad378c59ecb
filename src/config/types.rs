//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::analysis::Status;
use crate::config::constants::{
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_INSPECTION_TIMEOUT, DEFAULT_USER_AGENT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Rendering used for the final audit report on stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Coloured, human-readable report
    Text,
    /// Pretty-printed JSON document
    Json,
}

/// Exit code policy.
///
/// Decides which overall verdicts make the binary exit with status 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    /// Always exit 0 once a report is produced
    Never,
    /// Exit 2 when the overall status is FAIL
    Fail,
    /// Exit 2 when the overall status is WARNING or FAIL
    Warning,
}

impl FailOn {
    /// Returns the process exit code for an overall verdict status.
    pub fn exit_code(self, status: Status) -> i32 {
        let tripped = match self {
            FailOn::Never => false,
            FailOn::Fail => status == Status::Fail,
            FailOn::Warning => status >= Status::Warning,
        };
        if tripped {
            2
        } else {
            0
        }
    }
}

/// Command-line options and library configuration.
///
/// Parsed by `clap` in the binary; library callers can build one with
/// struct-update syntax over [`Config::default`].
///
/// # Examples
///
/// ```bash
/// # Audit a page with the built-in rule set
/// adstack_audit https://www.example.com/ --runtime-snapshot pbjs.json
///
/// # Custom rules, JSON report, non-zero exit on warnings
/// adstack_audit https://www.example.com/ --rules rules.json --output json --fail-on warning
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "adstack_audit",
    about = "Audits a page's header-bidding setup and ads.txt file against a rule set."
)]
pub struct Config {
    /// URL of the page to audit
    #[arg(value_parser)]
    pub url: String,

    /// JSON rule file (defaults to the built-in rule set)
    #[arg(long, value_parser)]
    pub rules: Option<PathBuf>,

    /// JSON capture of the page's header-bidding runtime object
    #[arg(long, value_parser)]
    pub runtime_snapshot: Option<PathBuf>,

    /// Previously captured bidding snapshot used when inspection times out
    #[arg(long, value_parser)]
    pub last_known_snapshot: Option<PathBuf>,

    /// Bounded wait for the runtime inspection in milliseconds
    #[arg(long, default_value_t = DEFAULT_INSPECTION_TIMEOUT.as_millis() as u64)]
    pub inspection_timeout_ms: u64,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Record malformed ads.txt lines instead of silently dropping them
    #[arg(long)]
    pub strict_ads_txt: bool,

    /// Report format: text|json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Exit code policy: never|fail|warning
    #[arg(long, value_enum, default_value_t = FailOn::Never)]
    pub fail_on: FailOn,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: String::new(),
            rules: None,
            runtime_snapshot: None,
            last_known_snapshot: None,
            inspection_timeout_ms: DEFAULT_INSPECTION_TIMEOUT.as_millis() as u64,
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            strict_ads_txt: false,
            output: OutputFormat::Text,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            fail_on: FailOn::Never,
        }
    }
}
