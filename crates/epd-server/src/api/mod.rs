//! HTTP application assembly

pub mod response;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::SqlitePool;
use tower_http::compression::CompressionLayer;

use crate::{config::Config, features, middleware};

/// Build the application router with all routes and middleware.
///
/// `/health` stays outside the token gate; everything under `/api/v1` is
/// behind it.
pub fn app(db: SqlitePool, config: &Config) -> Router {
    let api_routes = features::router(db.clone()).layer(axum::middleware::from_fn_with_state(
        config.auth.clone(),
        middleware::auth::require_bearer_token,
    ));

    Router::new()
        .route("/health", get(health_check))
        .with_state(db)
        .nest("/api/v1", api_routes)
        // Apply layers from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

/// Health check handler
async fn health_check(State(db): State<SqlitePool>) -> Result<Response, StatusCode> {
    match sqlx::query("SELECT 1").fetch_one(&db).await {
        Ok(_) => Ok((
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected"
            })),
        )
            .into_response()),
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        },
    }
}
