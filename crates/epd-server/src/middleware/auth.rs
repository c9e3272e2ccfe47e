//! Bearer-token authentication gate
//!
//! The server only answers the question "is this caller authorized": it
//! checks the presented `Authorization: Bearer <token>` header against the
//! configured token set. Token issuance and rotation happen elsewhere.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::AuthConfig;
use crate::error::AppError;

/// Middleware that rejects requests without a configured bearer token.
///
/// With an empty token set the gate is disabled and every request passes
/// (development mode; a warning is logged at startup).
pub async fn require_bearer_token(
    State(auth): State<AuthConfig>,
    request: Request,
    next: Next,
) -> Response {
    if !auth.enabled() {
        return next.run(request).await;
    }

    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| auth.accepts(token.trim()))
        .unwrap_or(false);

    if authorized {
        next.run(request).await
    } else {
        tracing::debug!("request rejected by token gate");
        AppError::Unauthorized("Missing or invalid API token".to_string()).into_response()
    }
}
