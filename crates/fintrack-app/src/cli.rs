//! CLI argument definitions for the fintrack application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use fintrack_core::config::FintrackConfig;

/// Environment variable naming the configuration file.
pub const ENV_CONFIG: &str = "FINTRACK_CONFIG";

/// Fintrack - personal finance backend with a Vietnamese/English chatbot.
#[derive(Parser, Debug)]
#[command(name = "fintrack", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// API server port.
    #[arg(short = 'p', long = "port", global = true)]
    pub port: Option<u16>,

    /// Data directory holding the SQLite database.
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the HTTP API server (default).
    Serve,
    /// Ask the chatbot a question.
    Ask {
        user_id: i64,
        question: String,
        /// Answer language: vi or en.
        #[arg(long)]
        locale: Option<String>,
        /// Print the full answer as JSON.
        #[arg(long)]
        json: bool,
        /// Answer as if today were this date (YYYY-MM-DD).
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Print raw query rows as JSON.
    Rows {
        user_id: i64,
        /// expense, income, category, budget, wallet, transactions or summary.
        query_type: String,
        /// Question used to pick the period, e.g. "tháng 5".
        #[arg(default_value = "")]
        question: String,
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// List the views the chatbot may read.
    Views,
    /// Write the resolved configuration to the config path.
    InitConfig {
        /// Replace an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Seed deterministic demo data for a user, creating it if needed.
    SeedDemo {
        email: String,
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

impl CliArgs {
    /// The subcommand to run, `serve` when none is given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }

    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > FINTRACK_CONFIG env var > ~/.fintrack/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        self.resolve_config_path_from(|key| std::env::var(key).ok())
    }

    fn resolve_config_path_from<F>(&self, lookup: F) -> PathBuf
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Some(p) = lookup(ENV_CONFIG) {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the API server port.
    ///
    /// Priority: --port flag > config value (already env-overridden).
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        self.port.unwrap_or(config_port)
    }

    /// Resolve the data directory path.
    ///
    /// Returns `None` if not overridden (use config value).
    pub fn resolve_data_dir(&self) -> Option<String> {
        self.data_dir
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
    }

    /// Resolve the log level.
    ///
    /// Returns `None` if not overridden.
    pub fn resolve_log_level(&self) -> Option<String> {
        self.log_level.clone()
    }

    /// Apply CLI flags on top of a loaded (and env-overridden) config.
    pub fn apply_overrides(&self, config: &mut FintrackConfig) {
        config.server.port = self.resolve_port(config.server.port);
        if let Some(dir) = self.resolve_data_dir() {
            config.general.data_dir = dir;
        }
        if let Some(level) = self.resolve_log_level() {
            config.general.log_level = level;
        }
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".fintrack").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".fintrack").join("config.toml");
    }
    PathBuf::from("config.toml")
}
