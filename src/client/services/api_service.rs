use crate::client::models::selection::SelectedFile;
use crate::common::config::{verification_url, ClientConfig};
use crate::common::errors::UploadError;
use log::{info, warn};
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

/// Client for `POST {base_url}/face/verification`.
#[derive(Debug, Clone)]
pub struct ApiService {
    client: reqwest::Client,
    base_url: String,
}

impl ApiService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Use a preconfigured `reqwest::Client` (proxy, TLS, timeouts).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn verification_url(&self) -> String {
        verification_url(&self.base_url)
    }

    /// Send `file` as the multipart field `file` and return the decoded JSON
    /// body. One request per call, no retries.
    ///
    /// A non-2xx status is an error even when the server sent JSON; the body
    /// travels inside [`UploadError::HttpStatus`].
    pub async fn upload(&self, file: &SelectedFile) -> Result<Value, UploadError> {
        let url = self.verification_url();
        info!("[API] uploading {} ({} bytes) to {}", file.file_name, file.size(), url);

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime)
            .map_err(|e| UploadError::Unknown(format!("invalid MIME type '{}': {}", file.mime, e)))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("[API] request to {} failed: {}", url, e);
                UploadError::from(e)
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(UploadError::from)?;

        if !status.is_success() {
            warn!("[API] {} answered {}", url, status);
            return Err(UploadError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().map(str::to_string),
                body: serde_json::from_slice(&body).ok(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| {
            warn!("[API] {} answered {} with a non-JSON body", url, status);
            UploadError::Unknown(format!("response is not valid JSON: {}", e))
        })
    }
}
