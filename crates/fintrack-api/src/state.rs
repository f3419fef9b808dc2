//! Application state shared across all route handlers.
//!
//! AppState holds references to the configuration, the database and the
//! chatbot service. It is passed to handlers via axum's State extractor.

use std::sync::Arc;
use std::time::Instant;

use fintrack_chat::ChatbotService;
use fintrack_core::config::FintrackConfig;
use fintrack_storage::{Database, SqliteAggregateStore};

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration, fixed for the lifetime of the server.
    pub config: Arc<FintrackConfig>,
    /// SQLite database holding records and aggregate views.
    pub database: Arc<Database>,
    /// Chatbot pipeline reading the aggregate views.
    pub chatbot: Arc<ChatbotService>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState, wiring the chatbot to `database`.
    pub fn new(config: FintrackConfig, database: Database) -> Self {
        let database = Arc::new(database);
        let store = Arc::new(SqliteAggregateStore::new(Arc::clone(&database)));
        let chatbot = ChatbotService::new(store, &config.chat);
        Self {
            config: Arc::new(config),
            database,
            chatbot: Arc::new(chatbot),
            start_time: Instant::now(),
        }
    }
}
