use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::dto::{RenameBody, SendBody, SenderBody, VerifyBody};
use crate::{
    AckDto, ApiError, HealthDto, ListDto, PopulateRequest, ProspectDto, SendOutcomeDto,
    SenderAckDto, SenderDto, ToggleDto, VerifyOutcomeDto,
};

/// Shared-secret header checked by the backend when a key is configured.
const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    /// `None` disables authorization entirely (dev posture).
    pub api_key: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_owned(),
            api_key: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Single choke point for all backend calls. No retries, no caching, no
/// per-call timeout overrides; every operation is one fresh round trip.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::network(err.to_string()))?;
        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_owned(),
            api_key: settings.api_key,
            http,
        })
    }

    pub async fn health(&self) -> Result<bool, ApiError> {
        let health: HealthDto = self.request(Method::GET, "/health", None).await?;
        Ok(health.ok)
    }

    pub async fn list_lists(&self) -> Result<Vec<ListDto>, ApiError> {
        self.request(Method::GET, "/lists", None).await
    }

    pub async fn get_list(&self, id: &str) -> Result<ListDto, ApiError> {
        self.request(Method::GET, &format!("/lists/{id}"), None).await
    }

    pub async fn list_prospects(&self, list_id: &str) -> Result<Vec<ProspectDto>, ApiError> {
        self.request(Method::GET, &format!("/lists/{list_id}/prospects"), None)
            .await
    }

    pub async fn rename_list(&self, id: &str, name: &str) -> Result<ListDto, ApiError> {
        let body = encode(&RenameBody { name })?;
        self.request(Method::PATCH, &format!("/lists/{id}"), Some(body))
            .await
    }

    pub async fn delete_list(&self, id: &str) -> Result<AckDto, ApiError> {
        self.request(Method::DELETE, &format!("/lists/{id}"), None)
            .await
    }

    pub async fn populate_list(&self, request: &PopulateRequest) -> Result<AckDto, ApiError> {
        let body = encode(request)?;
        self.request(Method::POST, "/lists/populate", Some(body))
            .await
    }

    pub async fn send_campaign(
        &self,
        limit: Option<u32>,
        default_dm: Option<&str>,
    ) -> Result<SendOutcomeDto, ApiError> {
        let body = encode(&SendBody { limit, default_dm })?;
        self.request(Method::POST, "/campaigns/send", Some(body))
            .await
    }

    pub async fn verify_connections(
        &self,
        limit: Option<u32>,
    ) -> Result<VerifyOutcomeDto, ApiError> {
        let body = encode(&VerifyBody { limit })?;
        self.request(Method::POST, "/connections/verify", Some(body))
            .await
    }

    pub async fn list_senders(&self) -> Result<Vec<SenderDto>, ApiError> {
        self.request(Method::GET, "/senders", None).await
    }

    pub async fn toggle_sender(&self, id: &str) -> Result<ToggleDto, ApiError> {
        self.request(Method::PATCH, &format!("/senders/{id}/toggle"), None)
            .await
    }

    pub async fn create_sender(
        &self,
        name: &str,
        storage_state: Option<&serde_json::Value>,
    ) -> Result<SenderAckDto, ApiError> {
        let body = encode(&SenderBody {
            name,
            storage_state,
        })?;
        self.request(Method::POST, "/senders", Some(body)).await
    }

    pub async fn update_sender(
        &self,
        id: &str,
        name: &str,
        storage_state: Option<&serde_json::Value>,
    ) -> Result<SenderAckDto, ApiError> {
        let body = encode(&SenderBody {
            name,
            storage_state,
        })?;
        self.request(Method::PATCH, &format!("/senders/{id}"), Some(body))
            .await
    }

    /// One round trip: attach headers, send, normalize every non-2xx into
    /// `ApiError`, decode the success body.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| ApiError::network(err.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::network(err.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::status(status.as_u16(), error_message(status, &bytes)));
        }

        serde_json::from_slice(&bytes).map_err(|err| ApiError::network(err.to_string()))
    }
}

fn encode<T: Serialize>(body: &T) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(body).map_err(|err| ApiError::network(err.to_string()))
}

/// Prefer the backend-supplied `detail` field, fall back to the HTTP
/// status text.
fn error_message(status: reqwest::StatusCode, bytes: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(bytes) {
        if let Some(detail) = value.get("detail").and_then(|detail| detail.as_str()) {
            return detail.to_owned();
        }
    }
    status
        .canonical_reason()
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| status.to_string())
}
