//! Fintrack API crate - axum HTTP server and chatbot route handlers.
//!
//! Exposes the finance chatbot over REST: question answering, raw query
//! rows, the view allowlist, demo questions, and health checks.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
