//! URL builders for EPD server endpoints

use uuid::Uuid;

/// Health check endpoint
pub fn health_url(base_url: &str) -> String {
    format!("{}/health", base_url.trim_end_matches('/'))
}

/// Dataset collection endpoint (upload and listing)
pub fn datasets_url(base_url: &str) -> String {
    format!("{}/api/v1/datasets", base_url.trim_end_matches('/'))
}

/// Single dataset endpoint (detail and deletion)
pub fn dataset_url(base_url: &str, id: Uuid) -> String {
    format!("{}/{}", datasets_url(base_url), id)
}

/// Chart data endpoint for one dataset
pub fn chart_data_url(base_url: &str, id: Uuid) -> String {
    format!("{}/chart-data", dataset_url(base_url, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_tolerate_trailing_slash() {
        assert_eq!(health_url("http://localhost:8000/"), "http://localhost:8000/health");
        assert_eq!(
            datasets_url("http://localhost:8000/"),
            "http://localhost:8000/api/v1/datasets"
        );
    }

    #[test]
    fn test_dataset_urls() {
        let id: Uuid = "00000000-0000-0000-0000-000000000001".parse().unwrap();
        assert_eq!(
            dataset_url("http://localhost:8000", id),
            "http://localhost:8000/api/v1/datasets/00000000-0000-0000-0000-000000000001"
        );
        assert_eq!(
            chart_data_url("http://localhost:8000", id),
            "http://localhost:8000/api/v1/datasets/00000000-0000-0000-0000-000000000001/chart-data"
        );
    }
}
