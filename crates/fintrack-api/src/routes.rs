//! Router setup with all API routes and middleware.
//!
//! Configures the axum Router with CORS, tracing, compression,
//! the service-key guard and all endpoint handlers.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use fintrack_core::config::FintrackConfig;
use fintrack_core::error::FintrackError;

use crate::handlers;
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS middleware: only the configured dashboard origins.
    let origins: Vec<HeaderValue> = state
        .config
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    // Routes that do NOT require a service key.
    let public_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/chatbot/health", get(handlers::chatbot_health))
        .route("/chatbot/views", get(handlers::chatbot_views))
        .route("/chatbot/demo-questions", get(handlers::demo_questions));

    // Query routes behind the service-key guard.
    let protected_routes = Router::new()
        .route("/chatbot/query", post(handlers::chatbot_query))
        .route("/chatbot/query/result", post(handlers::chatbot_query_result))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_service_key,
        ));

    public_routes
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1MB global limit
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the configured address.
pub async fn start_server(config: &FintrackConfig, state: AppState) -> Result<(), FintrackError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let router = create_router(state);

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| FintrackError::Api(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| FintrackError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
