//! Imgur API client implementation

use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client as HttpClient;
use reqwest::header::{AUTHORIZATION, CACHE_CONTROL};
use reqwest::multipart::Form;

use super::models::UploadResponse;
use super::{Authorization, ImageHost};
use crate::config::Settings;
use crate::error::{Result, UploadError};

/// Upper bound for the single upload request
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Imgur API client
pub struct ImgurClient {
    http: HttpClient,
    upload_url: String,
}

impl ImgurClient {
    /// Create a new client for the configured API host
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_timeout(settings, UPLOAD_TIMEOUT)
    }

    fn with_timeout(settings: &Settings, timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            upload_url: settings.upload_url(),
        })
    }
}

#[async_trait]
impl ImageHost for ImgurClient {
    async fn upload(&self, image: &[u8], auth: &Authorization) -> Result<String> {
        if image.is_empty() {
            return Err(UploadError::EmptyImage.into());
        }

        let form = Form::new()
            .text("image", general_purpose::STANDARD.encode(image))
            .text("type", "base64");

        log::debug!(
            "POST {} ({} bytes, {})",
            self.upload_url,
            image.len(),
            if auth.is_anonymous() {
                "anonymous"
            } else {
                "authorized"
            }
        );

        let response = self
            .http
            .post(&self.upload_url)
            .header(AUTHORIZATION, auth.header_value())
            .header(CACHE_CONTROL, "no-cache")
            .multipart(form)
            .send()
            .await
            .map_err(UploadError::from)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(UploadError::from)?;
        log::debug!("Upload response: HTTP {}", status);

        let decoded = UploadResponse::decode(status, &body)?;
        if let UploadResponse::Success(ref image) = decoded {
            log::info!("Uploaded image {}", image.id.as_deref().unwrap_or("?"));
        }
        Ok(decoded.into_link()?)
    }
}
