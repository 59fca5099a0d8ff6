//! Directory API client
//!
//! Thin typed wrapper over the REST surface. Every failed call is reported to
//! a shared [`ErrorNotifier`] before the error is returned, except a 404 from
//! the details lookup, which callers treat as "no details yet".

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::api::routes::DeleteResponse;
use crate::models::{
    Hospital, HospitalDetail, HospitalDetailPatch, HospitalPatch, NewHospital, NewHospitalDetail,
};

/// Default API base URL for local development
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Message used when a failed response carries no `message` field
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred";

// ============================================================================
// Client Configuration
// ============================================================================

/// Configuration for the directory client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API server URL, without the `/api/v1` prefix
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    /// Create a new client config
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================================================
// Error Notification
// ============================================================================

/// User-facing description of a failed call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub title: String,
    pub description: String,
    /// HTTP status, absent for transport failures
    pub status: Option<u16>,
}

impl ErrorNotice {
    fn from_error(error: &ClientError) -> Self {
        let (description, status) = match error {
            ClientError::HttpError { status, message } => (message.clone(), Some(*status)),
            _ => (FALLBACK_ERROR_MESSAGE.to_string(), None),
        };

        Self {
            title: "Error".to_string(),
            description,
            status,
        }
    }
}

/// Process-wide hook receiving every reportable client failure
pub trait ErrorNotifier: Send + Sync {
    fn notify(&self, notice: &ErrorNotice);
}

/// Notifier that writes notices to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl ErrorNotifier for LogNotifier {
    fn notify(&self, notice: &ErrorNotice) {
        tracing::error!(
            status = ?notice.status,
            "{}: {}",
            notice.title,
            notice.description
        );
    }
}

// ============================================================================
// Directory Client
// ============================================================================

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for the hospital directory API
#[derive(Clone)]
pub struct DirectoryClient {
    config: ClientConfig,
    api_root: Url,
    http_client: Client,
    notifier: Arc<dyn ErrorNotifier>,
}

impl DirectoryClient {
    /// Create a new client that logs failures
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let api_root = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InitError(format!("Invalid base URL: {e}")))?;
        if api_root.cannot_be_a_base() {
            return Err(ClientError::InitError(format!(
                "Invalid base URL: {}",
                config.base_url
            )));
        }

        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::InitError(e.to_string()))?;

        Ok(Self {
            config,
            api_root,
            http_client,
            notifier: Arc::new(LogNotifier),
        })
    }

    /// Replace the failure hook
    pub fn with_notifier(mut self, notifier: Arc<dyn ErrorNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Configured base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Fetch all hospitals, optionally filtered server-side by exact city
    pub async fn list_hospitals(&self, city: Option<&str>) -> Result<Vec<Hospital>, ClientError> {
        let url = self.endpoint(&["hospitals"]);
        let request = self.http_client.get(url.clone());
        let request = match city {
            Some(city) => request.query(&[("city", city)]),
            None => request,
        };
        self.execute(Method::GET, &url, request).await
    }

    /// Fetch one hospital
    pub async fn get_hospital(&self, id: &str) -> Result<Hospital, ClientError> {
        let url = self.endpoint(&["hospitals", id]);
        let request = self.http_client.get(url.clone());
        self.execute(Method::GET, &url, request).await
    }

    /// Create a hospital
    pub async fn create_hospital(&self, hospital: &NewHospital) -> Result<Hospital, ClientError> {
        let url = self.endpoint(&["hospitals", "create"]);
        let request = self.http_client.post(url.clone()).json(hospital);
        self.execute(Method::POST, &url, request).await
    }

    /// Apply a partial update to a hospital
    pub async fn update_hospital(
        &self,
        id: &str,
        patch: &HospitalPatch,
    ) -> Result<Hospital, ClientError> {
        let url = self.endpoint(&["hospitals", "update"]);
        let request = self
            .http_client
            .put(url.clone())
            .query(&[("id", id)])
            .json(patch);
        self.execute(Method::PUT, &url, request).await
    }

    /// Delete a hospital
    pub async fn delete_hospital(&self, id: &str) -> Result<DeleteResponse, ClientError> {
        let url = self.endpoint(&["hospitals", "delete"]);
        let request = self.http_client.delete(url.clone()).query(&[("id", id)]);
        self.execute(Method::DELETE, &url, request).await
    }

    /// Fetch the detail record of a hospital, `None` when it has none
    pub async fn get_details(
        &self,
        hospital_id: &str,
    ) -> Result<Option<HospitalDetail>, ClientError> {
        let url = self.endpoint(&["hospitals", "details", hospital_id]);
        let request = self.http_client.get(url.clone());

        match self.execute(Method::GET, &url, request).await {
            Ok(detail) => Ok(Some(detail)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Attach a detail record to a hospital
    pub async fn create_details(
        &self,
        hospital_id: &str,
        detail: &NewHospitalDetail,
    ) -> Result<HospitalDetail, ClientError> {
        let url = self.endpoint(&["hospitals", "details"]);
        let request = self
            .http_client
            .post(url.clone())
            .query(&[("id", hospital_id)])
            .json(detail);
        self.execute(Method::POST, &url, request).await
    }

    /// Apply a partial update to the detail record of a hospital
    pub async fn update_details(
        &self,
        hospital_id: &str,
        patch: &HospitalDetailPatch,
    ) -> Result<HospitalDetail, ClientError> {
        let url = self.endpoint(&["hospitals", "details", "update"]);
        let request = self
            .http_client
            .put(url.clone())
            .query(&[("id", hospital_id)])
            .json(patch);
        self.execute(Method::PUT, &url, request).await
    }

    /// `{base}/api/v1/{segments...}`, each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_root.clone();
        // `new` rejects cannot-be-a-base URLs
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "v1"]).extend(segments);
        }
        url
    }

    // Send once; report the failure unless it is an expected miss
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &Url,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let result = Self::send(request).await;

        if let Err(e) = &result {
            let path = url.path();
            if is_silent_failure(&method, path, e) {
                tracing::debug!(path, "No detail record found");
            } else {
                self.notifier.notify(&ErrorNotice::from_error(e));
            }
        }

        result
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ClientError::ParseError(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());

        Err(ClientError::HttpError {
            status: status.as_u16(),
            message,
        })
    }
}

fn is_silent_failure(method: &Method, path: &str, error: &ClientError) -> bool {
    *method == Method::GET && path.contains("/details/") && error.is_not_found()
}

// ============================================================================
// Client Errors
// ============================================================================

/// Client errors
#[derive(Debug, Clone)]
pub enum ClientError {
    /// Initialization error
    InitError(String),

    /// Network error
    NetworkError(String),

    /// HTTP error
    HttpError { status: u16, message: String },

    /// Parse error
    ParseError(String),
}

impl ClientError {
    /// Whether the server answered 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::HttpError { status: 404, .. })
    }

    /// HTTP status of the failure, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InitError(msg) => write!(f, "Initialization error: {msg}"),
            Self::NetworkError(msg) => write!(f, "Network error: {msg}"),
            Self::HttpError { status, message } => {
                write!(f, "HTTP error ({status}): {message}")
            }
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

// ============================================================================
// Tests
// ============================================================================
