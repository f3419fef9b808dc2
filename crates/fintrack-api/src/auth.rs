//! Service-key guard for the chatbot query endpoints.
//!
//! Callers pass the shared key as `?service_key=`. A supplied key must match
//! the configured one, and is always rejected when no key is configured.
//! Omitting it is allowed unless `auth.require_service_key` is set.

use axum::extract::{Query, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::warn;

use fintrack_core::config::AuthConfig;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ServiceKeyParams {
    pub service_key: Option<String>,
}

/// Check a supplied key against the auth settings.
pub fn check_service_key(auth: &AuthConfig, supplied: Option<&str>) -> Result<(), ApiError> {
    match (supplied, auth.service_key.as_deref()) {
        (Some(given), Some(expected)) if given != expected => {
            Err(ApiError::Unauthorized("Invalid service key".to_string()))
        }
        (Some(_), None) => Err(ApiError::Unauthorized("Invalid service key".to_string())),
        (None, _) if auth.require_service_key => {
            Err(ApiError::Unauthorized("Missing service key".to_string()))
        }
        _ => Ok(()),
    }
}

/// Middleware that validates the `service_key` query parameter.
pub async fn require_service_key(
    State(state): State<AppState>,
    Query(params): Query<ServiceKeyParams>,
    req: Request,
    next: Next,
) -> Response {
    match check_service_key(&state.config.auth, params.service_key.as_deref()) {
        Ok(()) => next.run(req).await,
        Err(e) => {
            warn!(path = %req.uri().path(), "Rejected chatbot request: bad service key");
            e.into_response()
        }
    }
}
