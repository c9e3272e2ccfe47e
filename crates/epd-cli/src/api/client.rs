//! HTTP API client for the EPD server

use crate::api::{endpoints, types::*};
use crate::error::{CliError, Result};
use epd_common::types::{ChartData, Dataset, IngestReceipt};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::time::Duration;
use uuid::Uuid;

// ============================================================================
// API Client Constants
// ============================================================================

/// Default timeout for API requests in seconds.
/// Can be overridden via EPD_API_TIMEOUT_SECS environment variable.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 60;

/// API client for the EPD server
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String, token: Option<String>) -> Result<Self> {
        let timeout_secs = std::env::var("EPD_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Server base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.request(method, url);
        if let Some(ref token) = self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Check server health
    pub async fn health_check(&self) -> Result<bool> {
        let url = endpoints::health_url(&self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// Upload a CSV file as a new dataset
    pub async fn upload_dataset(&self, filename: &str, content: Vec<u8>) -> Result<IngestReceipt> {
        let url = endpoints::datasets_url(&self.base_url);

        let part = reqwest::multipart::Part::bytes(content)
            .file_name(filename.to_string())
            .mime_str("text/csv")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .request(Method::POST, &url)
            .multipart(form)
            .send()
            .await?;

        unwrap_envelope(response).await
    }

    /// List recent datasets
    pub async fn list_datasets(&self, limit: Option<i64>) -> Result<Vec<Dataset>> {
        let url = endpoints::datasets_url(&self.base_url);

        let mut builder = self.request(Method::GET, &url);
        if let Some(limit) = limit {
            builder = builder.query(&[("limit", limit)]);
        }

        let response = builder.send().await?;

        unwrap_envelope(response).await
    }

    /// Get one dataset with all its items
    pub async fn get_dataset(&self, id: Uuid) -> Result<DatasetDetail> {
        let url = endpoints::dataset_url(&self.base_url, id);

        let response = self.request(Method::GET, &url).send().await?;

        unwrap_envelope(response).await
    }

    /// Get chart-ready per-type aggregates for one dataset
    pub async fn chart_data(&self, id: Uuid) -> Result<ChartData> {
        let url = endpoints::chart_data_url(&self.base_url, id);

        let response = self.request(Method::GET, &url).send().await?;

        unwrap_envelope(response).await
    }

    /// Delete one dataset and all its items
    pub async fn delete_dataset(&self, id: Uuid) -> Result<DeleteReceipt> {
        let url = endpoints::dataset_url(&self.base_url, id);

        let response = self.request(Method::DELETE, &url).send().await?;

        unwrap_envelope(response).await
    }
}

/// Decode the standard response envelope, turning error envelopes into
/// [`CliError::Api`]
async fn unwrap_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let envelope: Envelope<T> = response
        .json()
        .await
        .map_err(|e| CliError::InvalidResponse(format!("{status}: {e}")))?;

    if envelope.success {
        envelope
            .data
            .ok_or_else(|| CliError::InvalidResponse(format!("{status}: envelope without data")))
    } else {
        let message = envelope
            .error
            .map(|e| format!("{} ({})", e.message, e.code))
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Err(CliError::Api(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_datasets_sends_bearer_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/datasets"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [],
                "meta": {"count": 0}
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), Some("secret".to_string())).unwrap();
        let datasets = client.list_datasets(None).await.unwrap();
        assert!(datasets.is_empty());
    }

    #[tokio::test]
    async fn test_list_datasets_passes_limit() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/datasets"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": []
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), None).unwrap();
        assert!(client.list_datasets(Some(10)).await.is_ok());
    }

    #[tokio::test]
    async fn test_error_envelope_becomes_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false,
                "error": {"code": "NOT_FOUND", "message": "Dataset not found"}
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), None).unwrap();
        let result = client.get_dataset(Uuid::new_v4()).await;
        match result {
            Err(CliError::Api(message)) => {
                assert!(message.contains("NOT_FOUND"));
                assert!(message.contains("Dataset not found"));
            },
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_health_check_reports_unreachable_server() {
        let client = ApiClient::new("http://127.0.0.1:1".to_string(), None).unwrap();
        assert!(!client.health_check().await.unwrap());
    }
}
