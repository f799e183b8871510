//! HTTP client for the receipt extraction service.
//!
//! The service accepts a multipart-encoded receipt image and returns the
//! extracted line items. There is no cancellation: if a second image is
//! submitted while a call is outstanding, whichever response resolves last
//! wins. That is acceptable for a single-user local tool.

use reqwest::multipart;
use tracing::{info, warn};

use crate::api::ApiError;
use crate::config::Config;
use crate::types::{ApiErrorBody, ExtractResponse, ExtractedItem};

const EXTRACT_PATH: &str = "/api/v1/extract";
const HEALTH_PATH: &str = "/health";

/// Client for the extraction endpoint and its health check.
#[derive(Debug, Clone)]
pub struct ExtractionClient {
    base_url: String,
    client: reqwest::Client,
}

impl ExtractionClient {
    /// Build a client for the given base URL. A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tabsplit/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(config.api.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn extract_url(&self) -> String {
        format!("{}{}", self.base_url, EXTRACT_PATH)
    }

    fn health_url(&self) -> String {
        format!("{}{}", self.base_url, HEALTH_PATH)
    }

    /// Send a receipt image and return the extracted line items.
    ///
    /// Non-2xx responses are mapped to [`ApiError::Http`] using the service's
    /// error body; transport failures become [`ApiError::Network`].
    pub async fn extract(
        &self,
        file_name: &str,
        image: Vec<u8>,
    ) -> Result<Vec<ExtractedItem>, ApiError> {
        let part = multipart::Part::bytes(image).file_name(file_name.to_string());
        let form = multipart::Form::new().part("image", part);

        let response = self
            .client
            .post(self.extract_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body: ExtractResponse = response.json().await.map_err(|e| {
                warn!(error = %e, "extraction response did not decode");
                ApiError::InvalidResponse(e.to_string())
            })?;
            info!(items = body.items.len(), "receipt extraction succeeded");
            return Ok(body.items);
        }

        // The service returns { error, details? } with non-2xx statuses; fall
        // back to a generic message when even that does not parse.
        let body = response.json::<ApiErrorBody>().await.unwrap_or(ApiErrorBody {
            error: "Failed to process receipt".to_string(),
            details: None,
        });
        warn!(status = status.as_u16(), error = %body.error, "receipt extraction failed");
        Err(ApiError::from_body(status.as_u16(), body))
    }

    /// Liveness probe: true only when `/health` answers 2xx.
    pub async fn health(&self) -> bool {
        match self.client.get(self.health_url()).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
