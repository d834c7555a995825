//! API request handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use base64::Engine;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AssistError, ValidationError},
    observability::HealthChecker,
    session::{BillingClient, Plan, SessionStore},
    tools::{ToolEngine, ToolKind, ToolRequest, SUBJECTS},
    upload,
};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ToolEngine>,
    pub session: Arc<SessionStore>,
    pub billing: Arc<BillingClient>,
    pub health_checker: Arc<HealthChecker>,
    pub limits: crate::config::LimitsConfig,
}

/// Body for the text-based tools
#[derive(Debug, Deserialize)]
pub struct TextToolRequest {
    pub text: String,
}

/// Body for the assignment tool
#[derive(Debug, Deserialize)]
pub struct AssignmentToolRequest {
    pub text: String,
    #[serde(default)]
    pub subject: Option<String>,
}

/// Body carrying a base64-encoded file upload
#[derive(Debug, Deserialize)]
pub struct FileUploadRequest {
    pub file_name: String,
    pub mime_type: String,
    /// File bytes, base64-encoded
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct RecoverRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    /// "basic" or "premium"
    pub plan: String,
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PortalRequest {
    pub customer_id: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct PortalResponse {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractedTextResponse {
    pub text: String,
}

/// Generic error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map an engine error onto a status code: validation failures are the
/// caller's fault, upstream failures are the gateway's.
fn error_response(err: AssistError) -> Response {
    let status = match &err {
        AssistError::Validation(_) => StatusCode::BAD_REQUEST,
        AssistError::Generator(_) | AssistError::Provider(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

fn forbidden(kind: ToolKind) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(ErrorResponse {
            error: format!("Your plan does not include the {} tool", kind.as_str()),
        }),
    )
        .into_response()
}

fn decode_base64(data: &str) -> Result<Bytes, AssistError> {
    base64::engine::general_purpose::STANDARD
        .decode(data)
        .map(Bytes::from)
        .map_err(|e| ValidationError::InvalidBase64(e.to_string()).into())
}

async fn run_gated(state: &AppState, request: ToolRequest) -> Response {
    if !state.session.check_feature_access(request.kind).await {
        return forbidden(request.kind);
    }

    match state.engine.run(request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Rewrite text in an academic tone
pub async fn rewrite(
    State(state): State<AppState>,
    Json(req): Json<TextToolRequest>,
) -> Response {
    run_gated(&state, ToolRequest::rewrite(req.text)).await
}

/// Paraphrase text
pub async fn paraphrase(
    State(state): State<AppState>,
    Json(req): Json<TextToolRequest>,
) -> Response {
    run_gated(&state, ToolRequest::paraphrase(req.text)).await
}

/// Correct grammar and list the corrections
pub async fn grammar(
    State(state): State<AppState>,
    Json(req): Json<TextToolRequest>,
) -> Response {
    run_gated(&state, ToolRequest::grammar(req.text)).await
}

/// Solve an equation given as text
pub async fn equation(
    State(state): State<AppState>,
    Json(req): Json<TextToolRequest>,
) -> Response {
    run_gated(&state, ToolRequest::equation(req.text)).await
}

/// Solve an equation photographed in an image
pub async fn equation_from_image(
    State(state): State<AppState>,
    Json(req): Json<FileUploadRequest>,
) -> Response {
    let data = match decode_base64(&req.data) {
        Ok(data) => data,
        Err(e) => return error_response(e),
    };

    run_gated(&state, ToolRequest::equation_from_image(req.mime_type, data)).await
}

/// Analyze a document given as text
pub async fn document(
    State(state): State<AppState>,
    Json(req): Json<TextToolRequest>,
) -> Response {
    run_gated(&state, ToolRequest::document(req.text)).await
}

/// Extract text from an uploaded document file (.txt or .pdf)
pub async fn document_upload(
    State(state): State<AppState>,
    Json(req): Json<FileUploadRequest>,
) -> Response {
    let data = match decode_base64(&req.data) {
        Ok(data) => data,
        Err(e) => return error_response(e),
    };

    match upload::extract_document_text(&req.file_name, &req.mime_type, &data, &state.limits) {
        Ok(text) => (StatusCode::OK, Json(ExtractedTextResponse { text })).into_response(),
        Err(e) => error_response(e.into()),
    }
}

/// Solve an assignment for a chosen subject
pub async fn assignment(
    State(state): State<AppState>,
    Json(req): Json<AssignmentToolRequest>,
) -> Response {
    let subject = req.subject.unwrap_or_else(|| SUBJECTS[0].to_string());
    run_gated(&state, ToolRequest::assignment(req.text, subject)).await
}

/// Subjects offered for assignment help
pub async fn subjects() -> impl IntoResponse {
    Json(SUBJECTS)
}

/// Sign in
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Response {
    match state.session.login(&req.email, &req.password).await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Create an account
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Response {
    match state
        .session
        .signup(&req.email, &req.password, &req.full_name)
        .await
    {
        Ok(snapshot) => (StatusCode::CREATED, Json(snapshot)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Sign out
pub async fn logout(State(state): State<AppState>) -> Response {
    match state.session.logout().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// Request a password-reset email
pub async fn recover(
    State(state): State<AppState>,
    Json(req): Json<RecoverRequest>,
) -> Response {
    match state.session.reset_password(&req.email).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// Current session snapshot
pub async fn session(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.session.snapshot().await)
}

/// Reload the active subscription and return the refreshed session
pub async fn reload_subscription(State(state): State<AppState>) -> Response {
    match state.session.load_subscription().await {
        Ok(()) => (StatusCode::OK, Json(state.session.snapshot().await)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Create a checkout session for a paid plan
pub async fn checkout(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> Response {
    let plan = match req.plan.as_str() {
        "basic" => Plan::Basic,
        "premium" => Plan::Premium,
        other => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Unknown plan: {}", other),
                }),
            )
                .into_response();
        }
    };

    // Paid plans always carry a price id
    let price_id = match state.billing.price_id(plan) {
        Some(id) => id.to_string(),
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Plan has no price".to_string(),
                }),
            )
                .into_response();
        }
    };

    match state
        .billing
        .create_checkout_session(&price_id, &req.user_id)
        .await
    {
        Ok(session_id) => (
            StatusCode::OK,
            Json(CheckoutResponse { session_id }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Create a billing-portal session
pub async fn portal(
    State(state): State<AppState>,
    Json(req): Json<PortalRequest>,
) -> Response {
    match state.billing.create_portal_session(&req.customer_id).await {
        Ok(url) => (StatusCode::OK, Json(PortalResponse { url })).into_response(),
        Err(e) => error_response(e),
    }
}
