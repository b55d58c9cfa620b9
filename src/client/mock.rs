//! Mock image host for testing
//!
//! Records every upload instead of talking to Imgur.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Authorization, ImageHost};
use crate::error::{Result, UploadError};

/// A single recorded upload
#[derive(Debug, Clone)]
pub struct CapturedUpload {
    pub image: Vec<u8>,
    pub auth: Authorization,
}

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockImageHost::new().with_link("https://i.imgur.com/x.png");
/// let link = mock.upload(b"png", &auth).await?;
/// assert_eq!(mock.call_count().await, 1);
/// ```
pub struct MockImageHost {
    /// Link returned on success
    link: Arc<Mutex<String>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<UploadError>>>,
    /// Captured uploads for test assertions
    calls: Arc<Mutex<Vec<CapturedUpload>>>,
}

impl Default for MockImageHost {
    fn default() -> Self {
        Self {
            link: Arc::new(Mutex::new("https://i.imgur.com/abc.png".to_string())),
            error: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockImageHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_link(self, link: &str) -> Self {
        *self.link.try_lock().expect("mock not shared yet") = link.to_string();
        self
    }

    pub fn with_error(self, error: UploadError) -> Self {
        *self.error.try_lock().expect("mock not shared yet") = Some(error);
        self
    }

    pub async fn calls(&self) -> Vec<CapturedUpload> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl ImageHost for MockImageHost {
    async fn upload(&self, image: &[u8], auth: &Authorization) -> Result<String> {
        self.calls.lock().await.push(CapturedUpload {
            image: image.to_vec(),
            auth: auth.clone(),
        });

        if let Some(err) = self.error.lock().await.take() {
            return Err(err.into());
        }
        Ok(self.link.lock().await.clone())
    }
}
