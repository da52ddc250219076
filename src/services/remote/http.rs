//! HTTP backend for the remote asset host.
//!
//! Talks to the asset host's REST API:
//!
//! - `POST   {base}/v1/assets`       multipart upload, returns `{id, url}`
//! - `HEAD   {base}/v1/assets/{id}`  200 = present, 404 = absent
//! - `DELETE {base}/v1/assets/{id}`  2xx or 404 = deleted

use super::backend::{AssetHostBackend, RemoteAsset};
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;

/// Response body of a successful upload.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: String,
    url: String,
}

/// Remote asset host backend over HTTP.
///
/// All requests carry a bearer token and are bounded by one per-request
/// timeout so a degraded host cannot stall listings indefinitely.
#[derive(Clone)]
pub struct HttpAssetHost {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpAssetHost {
    /// Creates a new HTTP backend.
    ///
    /// # Arguments
    /// * `base_url` - Asset host API root (e.g., "https://assets.example.com")
    /// * `api_key` - Bearer token; empty string sends no Authorization header
    /// * `timeout` - Per-request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create asset host HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn asset_url(&self, asset_id: &str) -> String {
        format!("{}/v1/assets/{asset_id}", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.is_empty() {
            request
        } else {
            request.bearer_auth(&self.api_key)
        }
    }
}

#[async_trait]
impl AssetHostBackend for HttpAssetHost {
    async fn upload(
        &self,
        data: &[u8],
        display_name: &str,
        content_type: &str,
    ) -> Result<RemoteAsset> {
        let part = Part::bytes(data.to_vec())
            .file_name(display_name.to_string())
            .mime_str(content_type)
            .with_context(|| format!("Invalid content type: {content_type}"))?;
        let form = Form::new().part("file", part);

        let url = format!("{}/v1/assets", self.base_url);
        let response = self
            .authorize(self.client.post(&url))
            .multipart(form)
            .send()
            .await
            .context("Asset host upload request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Asset host upload rejected with status {status}: {body}");
        }

        let body: UploadResponse = response
            .json()
            .await
            .context("Failed to parse asset host upload response")?;

        Ok(RemoteAsset {
            asset_id: body.id,
            url: body.url,
        })
    }

    async fn exists(&self, asset_id: &str) -> Result<bool> {
        let response = self
            .authorize(self.client.head(self.asset_url(asset_id)))
            .send()
            .await
            .context("Asset host existence check failed")?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            // Anything else is not a definitive answer about the asset
            status => bail!("Asset host existence check returned status {status}"),
        }
    }

    async fn delete(&self, asset_id: &str) -> Result<()> {
        let response = self
            .authorize(self.client.delete(self.asset_url(asset_id)))
            .send()
            .await
            .context("Asset host delete request failed")?;

        match response.status() {
            status if status.is_success() => Ok(()),
            // Already gone counts as deleted
            StatusCode::NOT_FOUND => Ok(()),
            status => bail!("Asset host delete returned status {status}"),
        }
    }
}
