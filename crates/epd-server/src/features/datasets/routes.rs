//! Dataset API routes
//!
//! Wires the dataset commands and queries to Axum HTTP handlers.
//!
//! # Route Structure
//!
//! - `POST /api/v1/datasets` - Upload a CSV file and create a dataset
//! - `GET /api/v1/datasets` - List recent datasets
//! - `GET /api/v1/datasets/:id` - Get a single dataset with its items
//! - `GET /api/v1/datasets/:id/chart-data` - Per-type mean measures
//! - `DELETE /api/v1/datasets/:id` - Delete a dataset and its items

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::commands::{
    DeleteDatasetCommand, DeleteDatasetError, UploadDatasetCommand, UploadDatasetError,
};
use super::queries::{
    ChartDataError, ChartDataQuery, GetDatasetError, GetDatasetQuery, ListDatasetsError,
    ListDatasetsQuery,
};
use crate::api::response::{ApiResponse, ErrorResponse};
use crate::ingest::{validator, IngestError};

// ============================================================================
// Router Configuration
// ============================================================================

/// Creates the datasets router with all routes configured
pub fn datasets_routes() -> Router<SqlitePool> {
    Router::new()
        .route("/", post(upload_dataset))
        .route("/", get(list_datasets))
        .route("/:id", get(get_dataset))
        .route("/:id", delete(delete_dataset))
        .route("/:id/chart-data", get(chart_data))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Upload a CSV file and create a dataset
///
/// # Endpoint
///
/// `POST /api/v1/datasets` (multipart form, file under the `file` field)
///
/// # Response
///
/// - `201 Created` - Dataset ingested; body carries id, filename,
///   creation timestamp, and summary
/// - `400 Bad Request` - Wrong file type, malformed CSV, empty input,
///   missing columns, or row-level violations
/// - `500 Internal Server Error` - Storage failure
#[tracing::instrument(skip(pool, multipart))]
async fn upload_dataset(
    State(pool): State<SqlitePool>,
    mut multipart: Multipart,
) -> Result<Response, DatasetApiError> {
    let mut command = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DatasetApiError::Multipart(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let content = field
                .bytes()
                .await
                .map_err(|e| DatasetApiError::Multipart(e.to_string()))?
                .to_vec();
            command = Some(UploadDatasetCommand { filename, content });
            break;
        }
    }

    let command =
        command.ok_or(DatasetApiError::Upload(UploadDatasetError::MissingFile))?;

    let receipt = super::commands::upload::handle(pool, command).await?;

    tracing::info!(
        dataset_id = %receipt.id,
        filename = %receipt.filename,
        "Dataset uploaded via API"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::success(receipt))).into_response())
}

/// Delete a dataset and all its items
///
/// # Endpoint
///
/// `DELETE /api/v1/datasets/:id`
///
/// # Response
///
/// - `200 OK` - Dataset deleted
/// - `404 Not Found` - Unknown dataset id (a repeated delete lands here too)
#[tracing::instrument(skip(pool), fields(dataset_id = %id))]
async fn delete_dataset(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
) -> Result<Response, DatasetApiError> {
    let response = super::commands::delete::handle(pool, DeleteDatasetCommand { id }).await?;

    tracing::info!(dataset_id = %id, "Dataset deleted via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// List recent datasets
///
/// # Endpoint
///
/// `GET /api/v1/datasets?limit=5`
///
/// The limit defaults to the retention window (5) and is clamped to 1..=100.
#[tracing::instrument(skip(pool, query))]
async fn list_datasets(
    State(pool): State<SqlitePool>,
    Query(query): Query<ListDatasetsQuery>,
) -> Result<Response, DatasetApiError> {
    let datasets = super::queries::list::handle(pool, query).await?;

    let meta = json!({ "count": datasets.len() });

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_meta(datasets, meta)),
    )
        .into_response())
}

/// Get a single dataset with its items
///
/// # Endpoint
///
/// `GET /api/v1/datasets/:id`
#[tracing::instrument(skip(pool), fields(dataset_id = %id))]
async fn get_dataset(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
) -> Result<Response, DatasetApiError> {
    let detail = super::queries::get::handle(pool, GetDatasetQuery { id }).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(detail))).into_response())
}

/// Get chart-ready per-type aggregates for a dataset
///
/// # Endpoint
///
/// `GET /api/v1/datasets/:id/chart-data`
#[tracing::instrument(skip(pool), fields(dataset_id = %id))]
async fn chart_data(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
) -> Result<Response, DatasetApiError> {
    let chart = super::queries::chart_data::handle(pool, ChartDataQuery { id }).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(chart))).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for dataset API endpoints
#[derive(Debug)]
enum DatasetApiError {
    Multipart(String),
    Upload(UploadDatasetError),
    Delete(DeleteDatasetError),
    Get(GetDatasetError),
    List(ListDatasetsError),
    Chart(ChartDataError),
}

impl From<UploadDatasetError> for DatasetApiError {
    fn from(err: UploadDatasetError) -> Self {
        Self::Upload(err)
    }
}

impl From<DeleteDatasetError> for DatasetApiError {
    fn from(err: DeleteDatasetError) -> Self {
        Self::Delete(err)
    }
}

impl From<GetDatasetError> for DatasetApiError {
    fn from(err: GetDatasetError) -> Self {
        Self::Get(err)
    }
}

impl From<ListDatasetsError> for DatasetApiError {
    fn from(err: ListDatasetsError) -> Self {
        Self::List(err)
    }
}

impl From<ChartDataError> for DatasetApiError {
    fn from(err: ChartDataError) -> Self {
        Self::Chart(err)
    }
}

impl IntoResponse for DatasetApiError {
    fn into_response(self) -> Response {
        match self {
            DatasetApiError::Multipart(message) => {
                let error = ErrorResponse::new("BAD_REQUEST", message);
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },

            DatasetApiError::Upload(UploadDatasetError::MissingFile) => {
                let error = ErrorResponse::new(
                    "BAD_REQUEST",
                    "No file provided. Please upload a CSV file.",
                );
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            DatasetApiError::Upload(UploadDatasetError::Ingest(err)) => {
                ingest_error_response(err)
            },

            DatasetApiError::Delete(DeleteDatasetError::NotFound(id))
            | DatasetApiError::Get(GetDatasetError::NotFound(id))
            | DatasetApiError::Chart(ChartDataError::NotFound(id)) => {
                let error =
                    ErrorResponse::new("NOT_FOUND", format!("Dataset not found: {id}"));
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },

            DatasetApiError::Delete(DeleteDatasetError::Storage(e))
            | DatasetApiError::Get(GetDatasetError::Storage(e))
            | DatasetApiError::List(ListDatasetsError::Storage(e))
            | DatasetApiError::Chart(ChartDataError::Storage(e)) => {
                tracing::error!("Storage error in dataset API: {}", e);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A storage error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
        }
    }
}

/// Map an ingestion failure onto an HTTP response with a stable error code
fn ingest_error_response(err: IngestError) -> Response {
    match err {
        IngestError::Format(filename) => {
            let error = ErrorResponse::new(
                "FORMAT_ERROR",
                format!("Invalid file type: '{filename}'. Please upload a CSV file."),
            );
            (StatusCode::BAD_REQUEST, Json(error)).into_response()
        },
        IngestError::Parse(message) => {
            let error = ErrorResponse::new(
                "PARSE_ERROR",
                format!("Error parsing CSV file: {message}"),
            );
            (StatusCode::BAD_REQUEST, Json(error)).into_response()
        },
        IngestError::EmptyInput => {
            let error = ErrorResponse::new("EMPTY_INPUT", "The CSV file is empty.");
            (StatusCode::BAD_REQUEST, Json(error)).into_response()
        },
        IngestError::Schema { missing, found } => {
            let error = ErrorResponse::with_details(
                "SCHEMA_ERROR",
                format!("Missing required columns: {}", missing.join(", ")),
                json!({
                    "missing_columns": missing,
                    "found_columns": found,
                    "required_columns": validator::REQUIRED_COLUMNS,
                }),
            );
            (StatusCode::BAD_REQUEST, Json(error)).into_response()
        },
        IngestError::Content { violations, total } => {
            let error = ErrorResponse::with_details(
                "CONTENT_ERROR",
                "Data validation failed",
                json!({
                    "errors": violations,
                    "total": total,
                }),
            );
            (StatusCode::BAD_REQUEST, Json(error)).into_response()
        },
        IngestError::Storage(e) => {
            tracing::error!("Storage error during ingestion: {}", e);
            let error = ErrorResponse::new("INTERNAL_ERROR", "A storage error occurred");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_structure() {
        // Smoke test: the router can be constructed
        let router = datasets_routes();
        assert!(format!("{:?}", router).contains("Router"));
    }

    #[test]
    fn test_ingest_error_codes() {
        let response = ingest_error_response(IngestError::EmptyInput);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ingest_error_response(IngestError::Format("x.txt".to_string()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ingest_error_response(IngestError::Schema {
            missing: vec!["Type".to_string()],
            found: vec!["Equipment Name".to_string()],
        });
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
