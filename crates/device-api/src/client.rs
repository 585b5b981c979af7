//! HTTP client for the device API.
//!
//! All endpoints live under a configured base URL (e.g.
//! `https://dev-space.su/api/v1/a`).

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use rust_decimal::Decimal;
use std::time::Duration;

use paydesk_core::constants::GENERIC_SERVER_ERROR;
use paydesk_core::devices::{Device, DeviceApiClient, DeviceId, PlaceId};
use paydesk_core::ApiError;

use crate::error::{DeviceApiError, Result};
use crate::types::{ApiErrorResponse, DeltaRequest};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the remote device API.
#[derive(Debug, Clone)]
pub struct DeviceApiHttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl DeviceApiHttpClient {
    /// Create a new client with the default timeout.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The API base (e.g., "https://dev-space.su/api/v1/a")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        if base_url.is_empty() {
            return Err(DeviceApiError::invalid_request("Empty API base URL"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(Self::headers())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Parse a JSON response body.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        debug!("API response ({}): {}", status, body);

        if !status.is_success() {
            let message = server_message(&body)
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            return Err(DeviceApiError::api(status.as_u16(), message));
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!(
                "Failed to deserialize response. Body: {}, Error: {}",
                body,
                e
            );
            DeviceApiError::Json(e)
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Devices
    // ─────────────────────────────────────────────────────────────────────────

    /// List all devices.
    ///
    /// GET /devices/
    pub async fn fetch_devices(&self) -> Result<Vec<Device>> {
        let url = format!("{}/devices/", self.base_url);
        debug!("[DeviceApi] fetch_devices URL: {}", url);

        let response = self.client.get(&url).send().await?;

        Self::parse_response(response).await
    }

    /// Get one device with its places.
    ///
    /// GET /devices/{deviceId}/
    pub async fn fetch_device(&self, device_id: DeviceId) -> Result<Device> {
        let url = format!("{}/devices/{}/", self.base_url, device_id);

        let response = self.client.get(&url).send().await?;

        Self::parse_response(response).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Places
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a signed delta to a place balance. The response body is ignored.
    ///
    /// Never retried: a replayed deposit would be applied twice.
    ///
    /// POST /devices/{deviceId}/place/{placeId}/update
    pub async fn update_place(
        &self,
        device_id: DeviceId,
        place_id: PlaceId,
        delta: Decimal,
    ) -> Result<()> {
        let url = format!(
            "{}/devices/{}/place/{}/update",
            self.base_url, device_id, place_id
        );
        let body = DeltaRequest::new(delta)?;
        debug!("Updating place: {} {:?}", url, body);

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        debug!("API response ({}): {}", status, body);
        let message = server_message(&body).unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());
        Err(DeviceApiError::api(status.as_u16(), message))
    }
}

/// The `message` field of an error body, when present and non-empty.
fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
}

#[async_trait]
impl DeviceApiClient for DeviceApiHttpClient {
    async fn list_devices(&self) -> std::result::Result<Vec<Device>, ApiError> {
        self.fetch_devices().await.map_err(ApiError::from)
    }

    async fn get_device(&self, device_id: DeviceId) -> std::result::Result<Device, ApiError> {
        self.fetch_device(device_id).await.map_err(ApiError::from)
    }

    async fn apply_delta(
        &self,
        device_id: DeviceId,
        place_id: PlaceId,
        delta: Decimal,
    ) -> std::result::Result<(), ApiError> {
        self.update_place(device_id, place_id, delta)
            .await
            .map_err(ApiError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_trimmed() {
        let client = DeviceApiHttpClient::new("http://localhost:8080/api/v1/a/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api/v1/a");
    }

    #[test]
    fn empty_base_url_is_rejected() {
        assert!(matches!(
            DeviceApiHttpClient::new("/"),
            Err(DeviceApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn server_message_ignores_missing_or_blank_messages() {
        assert_eq!(
            server_message(r#"{"message":"Place is locked"}"#).as_deref(),
            Some("Place is locked")
        );
        assert_eq!(server_message(r#"{"message":"  "}"#), None);
        assert_eq!(server_message("<html>502</html>"), None);
        assert_eq!(server_message(""), None);
    }
}
