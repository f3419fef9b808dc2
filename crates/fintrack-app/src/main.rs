//! Fintrack application binary - composition root.
//!
//! 1. Parse CLI flags and load configuration from TOML
//! 2. Open the SQLite database (migrations run on open)
//! 3. Run the selected command: the axum API server, a one-off chatbot
//!    question, raw query rows, the view allowlist, the demo seed, or
//!    writing the resolved configuration

mod cli;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter};

use fintrack_api::routes;
use fintrack_api::state::AppState;
use fintrack_chat::{ChatbotService, Locale};
use fintrack_core::config::FintrackConfig;
use fintrack_core::error::FintrackError;
use fintrack_storage::{seed_demo, AllowedView, Database, Ledger, SqliteAggregateStore};

use cli::{CliArgs, Command};

/// Expand ~ to home directory in a path string.
fn resolve_data_dir(data_dir: &str) -> PathBuf {
    if data_dir.starts_with("~/") || data_dir.starts_with("~\\") {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(&data_dir[2..])
    } else {
        PathBuf::from(data_dir)
    }
}

fn open_database(config: &FintrackConfig) -> Result<Database, FintrackError> {
    let data_dir = resolve_data_dir(&config.general.data_dir);

    // Create data directory if it doesn't exist
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        tracing::error!(path = %data_dir.display(), error = %e, "Failed to create data directory");
        return Err(e.into());
    }

    let db_path = data_dir.join("fintrack.db");
    let db = Database::new(&db_path)?;
    tracing::info!(path = %db_path.display(), "SQLite database opened");
    Ok(db)
}

fn chatbot(config: &FintrackConfig) -> Result<ChatbotService, FintrackError> {
    let db = Arc::new(open_database(config)?);
    Ok(ChatbotService::new(
        Arc::new(SqliteAggregateStore::new(db)),
        &config.chat,
    ))
}

fn parse_locale(tag: Option<&str>) -> Result<Option<Locale>, FintrackError> {
    match tag {
        None => Ok(None),
        Some(t) => Locale::from_tag(t)
            .map(Some)
            .ok_or_else(|| FintrackError::Config(format!("Unsupported locale: {}", t))),
    }
}

fn today_or(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// Write `config` to `path`, refusing to replace an existing file unless
/// `force` is set.
fn write_config(config: &FintrackConfig, path: &Path, force: bool) -> Result<(), FintrackError> {
    if path.exists() && !force {
        return Err(FintrackError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    config.save(path)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliArgs::parse();

    // Tracing. RUST_LOG and --log-level pin the filter; otherwise the
    // configured level replaces the bootstrap one once the config is loaded.
    let env_filter = EnvFilter::try_from_default_env().ok();
    let pinned = env_filter.is_some() || cli.resolve_log_level().is_some();
    let initial = env_filter.unwrap_or_else(|| {
        EnvFilter::new(cli.resolve_log_level().unwrap_or_else(|| "info".to_string()))
    });
    let (filter, filter_handle) = reload::Layer::new(initial);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    // Config.
    let config_file = cli.resolve_config_path();
    let mut config = FintrackConfig::load_or_default(&config_file);
    if !pinned {
        filter_handle.reload(EnvFilter::new(&config.general.log_level))?;
    }
    tracing::debug!(path = %config_file.display(), "Configuration resolved");
    config.apply_env_overrides();
    cli.apply_overrides(&mut config);
    config.validate()?;

    match cli.command() {
        Command::Serve => {
            tracing::info!("Starting fintrack v{}", env!("CARGO_PKG_VERSION"));
            let db = open_database(&config)?;
            let state = AppState::new(config.clone(), db);
            if config.auth.service_key.is_none() {
                tracing::warn!("No service key configured; only keyless chatbot queries are accepted");
            }
            routes::start_server(&config, state).await?;
        }
        Command::Ask {
            user_id,
            question,
            locale,
            json,
            today,
        } => {
            let service = chatbot(&config)?;
            let locale = parse_locale(locale.as_deref())?;
            let answer = service.ask_on(
                user_id,
                &question,
                &config.chat.default_timezone,
                locale,
                today_or(today),
            )?;
            if json {
                println!("{}", serde_json::to_string_pretty(&answer)?);
            } else {
                println!("{}", answer.answer);
                if !answer.suggested_actions.is_empty() {
                    println!();
                    for action in &answer.suggested_actions {
                        println!("  → {}", action);
                    }
                }
            }
        }
        Command::Rows {
            user_id,
            query_type,
            question,
            today,
        } => {
            let service = chatbot(&config)?;
            let rows = service.query_rows_on(user_id, &question, &query_type, today_or(today))?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        Command::InitConfig { force } => {
            write_config(&config, &config_file, force)?;
            println!("Wrote {}", config_file.display());
        }
        Command::Views => {
            for view in AllowedView::ALL {
                println!("{}", view);
            }
        }
        Command::SeedDemo { email, today } => {
            let db = Arc::new(open_database(&config)?);
            let ledger = Ledger::new(db);
            let summary = seed_demo(&ledger, &email, today_or(today))?;
            println!(
                "Seeded demo data for {} (user_id {}): {} wallets, {} categories, {} transactions, {} budgets",
                email,
                summary.user_id,
                summary.wallets,
                summary.categories,
                summary.transactions,
                summary.budgets
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_data_dir_plain_path() {
        assert_eq!(resolve_data_dir("/var/lib/fintrack"), PathBuf::from("/var/lib/fintrack"));
    }

    #[test]
    fn test_resolve_data_dir_expands_home() {
        let resolved = resolve_data_dir("~/.fintrack/data");
        assert!(resolved.ends_with(".fintrack/data"));
        assert!(!resolved.to_string_lossy().starts_with('~'));
    }

    #[test]
    fn test_parse_locale() {
        assert!(matches!(parse_locale(Some("en")), Ok(Some(Locale::En))));
        assert!(matches!(parse_locale(None), Ok(None)));
        assert!(parse_locale(Some("de")).is_err());
    }

    #[test]
    fn test_write_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = FintrackConfig::default();
        config.server.port = 9200;

        write_config(&config, &path, false).unwrap();
        assert_eq!(FintrackConfig::load(&path).unwrap().server.port, 9200);

        config.server.port = 9300;
        assert!(matches!(
            write_config(&config, &path, false),
            Err(FintrackError::Config(_))
        ));
        assert_eq!(FintrackConfig::load(&path).unwrap().server.port, 9200);

        write_config(&config, &path, true).unwrap();
        assert_eq!(FintrackConfig::load(&path).unwrap().server.port, 9300);
    }

    #[test]
    fn test_open_database_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FintrackConfig::default();
        config.general.data_dir = dir.path().join("nested").to_string_lossy().to_string();
        let db = open_database(&config).unwrap();
        assert!(db.ping().is_ok());
        assert!(dir.path().join("nested").join("fintrack.db").exists());
    }
}
