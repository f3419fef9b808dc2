//! Route handler functions for all API endpoints.
//!
//! Each handler extracts query/body parameters via axum extractors, calls
//! the chatbot service in AppState, and returns JSON responses.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use fintrack_chat::demo::DemoQuestions;
use fintrack_chat::{Locale, QueryRows};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request types
// =============================================================================

/// Request body for the chatbot query endpoints.
#[derive(Debug, Deserialize)]
pub struct ChatQueryRequest {
    /// User whose data is queried.
    pub user_id: i64,
    /// Question in Vietnamese or English.
    pub question: String,
    /// Timezone label; defaults to `chat.default_timezone`.
    pub timezone: Option<String>,
    /// Answer language tag ("vi", "en"); defaults to `chat.default_locale`.
    pub locale: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QueryResultParams {
    pub query_type: String,
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatbotHealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
    pub available_views: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatQueryResponse {
    pub answer: String,
    pub data: Option<Value>,
    pub suggested_actions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ViewsResponse {
    pub allowed_views: Vec<String>,
    pub total: usize,
    pub note: String,
}

// =============================================================================
// Health endpoints
// =============================================================================

/// GET /health - server liveness and database reachability.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let db_ok = match state.database.ping() {
        Ok(()) => true,
        Err(e) => {
            error!(error = %e, "Health check failed: database unreachable");
            false
        }
    };

    Ok(Json(HealthResponse {
        status: if db_ok { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    }))
}

/// GET /chatbot/health - chatbot status and the views it may read.
pub async fn chatbot_health(State(state): State<AppState>) -> Json<ChatbotHealthResponse> {
    Json(ChatbotHealthResponse {
        status: "healthy".to_string(),
        service: "chatbot".to_string(),
        timestamp: chrono::Local::now()
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string(),
        available_views: owned(state.chatbot.available_views()),
    })
}

// =============================================================================
// Chatbot endpoints
// =============================================================================

/// POST /chatbot/query - answer a finance question for one user.
pub async fn chatbot_query(
    State(state): State<AppState>,
    Json(body): Json<ChatQueryRequest>,
) -> Result<Json<ChatQueryResponse>, ApiError> {
    let locale = parse_locale(body.locale.as_deref())?;
    let timezone = body
        .timezone
        .as_deref()
        .unwrap_or(&state.config.chat.default_timezone);

    let answer = state
        .chatbot
        .ask(body.user_id, &body.question, timezone, locale)?;

    Ok(Json(ChatQueryResponse {
        answer: answer.answer,
        data: answer.data,
        suggested_actions: answer.suggested_actions,
    }))
}

/// POST /chatbot/query/result?query_type= - raw rows for callers that
/// format answers themselves.
pub async fn chatbot_query_result(
    State(state): State<AppState>,
    Query(params): Query<QueryResultParams>,
    Json(body): Json<ChatQueryRequest>,
) -> Result<Json<QueryRows>, ApiError> {
    let rows = state
        .chatbot
        .query_rows(body.user_id, &body.question, &params.query_type)?;
    Ok(Json(rows))
}

/// GET /chatbot/views - the views the chatbot may read.
pub async fn chatbot_views(State(state): State<AppState>) -> Json<ViewsResponse> {
    let allowed_views = owned(state.chatbot.available_views());
    Json(ViewsResponse {
        total: allowed_views.len(),
        allowed_views,
        note: "Chatbot can only query these predefined views for security".to_string(),
    })
}

/// GET /chatbot/demo-questions - sample questions in both languages.
pub async fn demo_questions(State(state): State<AppState>) -> Json<DemoQuestions> {
    Json(state.chatbot.demo_questions())
}

fn parse_locale(tag: Option<&str>) -> Result<Option<Locale>, ApiError> {
    match tag {
        None => Ok(None),
        Some(t) => Locale::from_tag(t)
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(format!("Unsupported locale: {}", t))),
    }
}

fn owned(names: Vec<&'static str>) -> Vec<String> {
    names.into_iter().map(str::to_string).collect()
}
