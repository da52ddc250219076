//! Shared test host for HTTP API integration tests.
//!
//! Starts a real server on an ephemeral port over temp-dir file stores
//! and an in-memory asset host the tests can reach into, both to inject
//! failures and to delete copies out-of-band.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tempfile::TempDir;

use pixgate::config::LimitsConfig;
use pixgate::gateway::Gateway;
use pixgate::server;
use pixgate::services::blobs::BlobStore;
use pixgate::services::records::RecordStore;
use pixgate::services::remote::{AssetHostClient, MemoryAssetHost};

/// Bytes that look like a PNG. The gateway validates the declared content
/// type, not pixel data, so these are enough for the workflows.
pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot a real image, close enough";

/// A running gateway over temp-dir file stores and an in-memory asset host.
pub struct TestHost {
    base_url: String,
    client: reqwest::Client,
    /// Shared handle into the asset host the gateway talks to.
    pub remote: MemoryAssetHost,
    data_dir: TempDir,
    server: tokio::task::JoinHandle<()>,
}

/// Builder for [`TestHost`].
pub struct TestHostBuilder {
    limits: LimitsConfig,
}

impl TestHostBuilder {
    /// Override the upload size ceiling.
    #[allow(dead_code)]
    pub fn max_upload_bytes(mut self, limit: u64) -> Self {
        self.limits.max_upload_bytes = limit;
        self
    }

    /// Start the server on an ephemeral port.
    pub async fn start(self) -> Result<TestHost> {
        let data_dir = TempDir::new().context("Failed to create temp data dir")?;
        let records = RecordStore::file(data_dir.path().join("records.json"))?;
        let blobs = BlobStore::file(data_dir.path().join("blobs"))?;
        let remote = MemoryAssetHost::new();
        let gateway = Gateway::new(
            records,
            blobs,
            AssetHostClient::custom(remote.clone()),
            self.limits,
        );

        let app = server::app(gateway)?;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind test listener")?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(TestHost {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
            remote,
            data_dir,
            server,
        })
    }
}

impl TestHost {
    pub fn builder() -> TestHostBuilder {
        TestHostBuilder {
            limits: LimitsConfig::default(),
        }
    }

    /// Full URL for a path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// On-disk path of a stored blob.
    pub fn blob_path(&self, filename: &str) -> PathBuf {
        self.data_dir.path().join("blobs").join(filename)
    }

    pub async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client.get(self.url(path)).send().await
    }

    pub async fn post(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client.post(self.url(path)).send().await
    }

    pub async fn delete(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client.delete(self.url(path)).send().await
    }

    /// POST multipart data to /upload under the given field name.
    pub async fn upload_as(
        &self,
        field: &str,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<reqwest::Response> {
        let part = reqwest::multipart::Part::bytes(data.to_vec())
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = reqwest::multipart::Form::new().part(field.to_string(), part);
        let resp = self
            .client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await?;
        Ok(resp)
    }

    /// POST multipart data to /upload as the `image` field.
    pub async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<reqwest::Response> {
        self.upload_as("image", filename, content_type, data).await
    }

    /// Upload PNG test bytes and return the created record as JSON.
    pub async fn upload_png(&self, filename: &str) -> Result<serde_json::Value> {
        let resp = self.upload(filename, "image/png", PNG).await?;
        anyhow::ensure!(resp.status() == 201, "upload failed: {}", resp.status());
        let body: serde_json::Value = resp.json().await?;
        Ok(body["image"].clone())
    }

    /// GET /images and return the parsed body.
    pub async fn list(&self) -> Result<serde_json::Value> {
        let resp = self.get("/images").await?;
        anyhow::ensure!(resp.status() == 200, "list failed: {}", resp.status());
        Ok(resp.json().await?)
    }
}

impl Drop for TestHost {
    fn drop(&mut self) {
        self.server.abort();
    }
}
