use async_trait::async_trait;
use log::{debug, info, warn};
use std::fmt;

use super::types::{OffsetEnvelope, Student};

/// Errors that can occur while talking to the student service.
/// Variants carry enough info to determine retryability (future use).
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused). Retryable.
    Network(String),
    /// Server returned a non-success status. Retryable if status >= 500.
    Api { status: u16, message: String },
    /// Failed to parse the response body. Not retryable.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Read-only access to the student directory service.
///
/// The two methods mirror the two pagination endpoints; each takes the
/// already-built query parameters and returns the endpoint's raw shape.
/// Normalization into [`super::types::Page`] happens at the call site in
/// the orchestrator driver, so implementations stay dumb transports.
#[async_trait]
pub trait StudentApi: Send + Sync {
    /// `GET /api/students` — offset pagination, enveloped response.
    async fn offset_page(&self, query: &[(String, String)]) -> Result<OffsetEnvelope, ApiError>;

    /// `GET /api/students/cursor` — cursor pagination, bare array response.
    async fn cursor_page(&self, query: &[(String, String)]) -> Result<Vec<Student>, ApiError>;
}

/// Production implementation backed by reqwest.
pub struct HttpStudentApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpStudentApi {
    pub fn new(base_url: Option<String>) -> Self {
        let env_url = std::env::var("ROSTER_BASE_URL").ok();
        let final_url = base_url
            .or(env_url)
            .unwrap_or_else(|| "http://localhost:8080".to_string());

        Self {
            base_url: final_url,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        info!("GET {}{} with {} query params", self.base_url, path, query.len());

        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        debug!("{} response status: {}", path, response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Student API error: {} - {}", status, err_body);
            return Err(ApiError::Api {
                status,
                message: err_body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl StudentApi for HttpStudentApi {
    async fn offset_page(&self, query: &[(String, String)]) -> Result<OffsetEnvelope, ApiError> {
        self.get_json("/api/students", query).await
    }

    async fn cursor_page(&self, query: &[(String, String)]) -> Result<Vec<Student>, ApiError> {
        self.get_json("/api/students/cursor", query).await
    }
}
