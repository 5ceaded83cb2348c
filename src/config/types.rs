//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::analyzer::Severity;
use crate::config::constants::{
    DB_PATH, DEFAULT_LISTEN_ADDR, DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_REDIRECTS,
    DEFAULT_USER_AGENT, HOP_TIMEOUT_SECS,
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
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Exit-code policy for the `check` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    /// Always exit 0 when the analysis itself completed
    Never,
    /// Fail on any issue
    Low,
    /// Fail on medium, high or critical issues
    Medium,
    /// Fail on high or critical issues
    High,
    /// Fail only on redirect loops
    Critical,
}

impl FailOn {
    /// Lowest severity that makes the command fail, if any.
    pub fn threshold(self) -> Option<Severity> {
        match self {
            FailOn::Never => None,
            FailOn::Low => Some(Severity::Low),
            FailOn::Medium => Some(Severity::Medium),
            FailOn::High => Some(Severity::High),
            FailOn::Critical => Some(Severity::Critical),
        }
    }
}

/// Command-line options.
#[derive(Debug, Parser)]
#[command(
    name = "redirect_audit",
    version,
    about = "Follows HTTP redirect chains and reports loops, downgrades and slow or long chains"
)]
pub struct Opt {
    /// Log level
    #[arg(long, value_enum, default_value = "info", global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP analysis endpoint
    Serve(ServeOpt),
    /// Analyze URLs once and print the JSON report
    Check(CheckOpt),
}

/// Options shared by every command that issues hop requests.
#[derive(Debug, Clone, Args)]
pub struct ClientOpt {
    /// Per-hop request timeout in seconds
    #[arg(long, default_value_t = HOP_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Number of URLs analyzed at once within a batch
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,
}

/// Options for `serve`.
#[derive(Debug, Clone, Args)]
pub struct ServeOpt {
    /// Address to listen on
    #[arg(long, env = "REDIRECT_AUDIT_LISTEN", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: SocketAddr,

    /// SQLite database path for stored analyses
    #[arg(long, env = "REDIRECT_AUDIT_DB_PATH", default_value = DB_PATH)]
    pub db_path: PathBuf,

    #[command(flatten)]
    pub client: ClientOpt,
}

/// Options for `check`.
#[derive(Debug, Clone, Args)]
pub struct CheckOpt {
    /// URLs to analyze
    #[arg(required_unless_present = "file")]
    pub urls: Vec<String>,

    /// Read URLs from a file, one per line (`-` for stdin)
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Maximum redirect hops followed per URL
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,

    /// Also store the report in this SQLite database
    #[arg(long, env = "REDIRECT_AUDIT_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Exit with status 2 when an issue at or above this severity is found
    #[arg(long, value_enum, default_value = "never")]
    pub fail_on_issues: FailOn,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,

    #[command(flatten)]
    pub client: ClientOpt,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use redirect_audit::Config;
///
/// let config = Config {
///     max_concurrency: 4,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP endpoint binds to
    pub listen: SocketAddr,

    /// Database path (SQLite file)
    pub db_path: PathBuf,

    /// Per-hop timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Number of URLs analyzed at once within a batch
    pub max_concurrency: usize,

    /// Redirect cap applied when a request omits `maxRedirects`
    pub default_max_redirects: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8787))),
            db_path: PathBuf::from(DB_PATH),
            timeout_seconds: HOP_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            default_max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl From<ServeOpt> for Config {
    fn from(opt: ServeOpt) -> Self {
        Self {
            listen: opt.listen,
            db_path: opt.db_path,
            timeout_seconds: opt.client.timeout_seconds,
            user_agent: opt.client.user_agent,
            max_concurrency: opt.client.max_concurrency.max(1),
            default_max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}
