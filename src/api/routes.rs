//! API route configuration

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{self, AppState};

/// Build the complete API router with middleware
pub fn build_router(app_state: AppState) -> Router {
    let body_limit_bytes = app_state.limits.max_body_size_mb * 1024 * 1024;

    // Public routes
    let public_routes = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/health/live", get(liveness_handler))
        .route("/health/ready", get(readiness_handler))
        .with_state(app_state.clone());

    // Tool, session, and billing routes
    let api_routes = Router::new()
        .route("/api/v1/tools/rewrite", post(handlers::rewrite))
        .route("/api/v1/tools/paraphrase", post(handlers::paraphrase))
        .route("/api/v1/tools/grammar", post(handlers::grammar))
        .route("/api/v1/tools/equation", post(handlers::equation))
        .route("/api/v1/tools/equation/image", post(handlers::equation_from_image))
        .route("/api/v1/tools/document", post(handlers::document))
        .route("/api/v1/tools/document/upload", post(handlers::document_upload))
        .route("/api/v1/tools/assignment", post(handlers::assignment))
        .route("/api/v1/tools/subjects", get(handlers::subjects))
        .route("/api/v1/session", get(handlers::session))
        .route("/api/v1/session/login", post(handlers::login))
        .route("/api/v1/session/signup", post(handlers::signup))
        .route("/api/v1/session/logout", post(handlers::logout))
        .route("/api/v1/session/recover", post(handlers::recover))
        .route("/api/v1/session/subscription", post(handlers::reload_subscription))
        .route("/api/v1/billing/checkout", post(handlers::checkout))
        .route("/api/v1/billing/portal", post(handlers::portal))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state);

    public_routes.merge(api_routes)
}

/// Root handler
async fn root_handler() -> impl axum::response::IntoResponse {
    use axum::Json;
    Json(serde_json::json!({
        "service": "Edueasee Assist Engine",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// Full health report
async fn health_handler(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    use axum::{http::StatusCode, Json};

    let health = state.health_checker.check_health();
    let status_code = match health.status {
        crate::observability::HealthStatus::Healthy
        | crate::observability::HealthStatus::Degraded => StatusCode::OK,
        crate::observability::HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Liveness probe handler - always returns 200
async fn liveness_handler() -> impl axum::response::IntoResponse {
    use axum::{http::StatusCode, Json};
    use serde_json::json;

    (StatusCode::OK, Json(json!({"status": "alive"})))
}

/// Readiness probe handler
async fn readiness_handler(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    use axum::{http::StatusCode, Json};
    use serde_json::json;

    if state.health_checker.readiness() {
        (StatusCode::OK, Json(json!({"status": "ready"})))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"status": "not_ready"})),
        )
    }
}
