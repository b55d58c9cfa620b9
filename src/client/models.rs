//! Imgur API response schema

use serde::Deserialize;

use crate::error::UploadError;

/// Imgur wraps every payload in `{ "data": ..., "success": ..., "status": ... }`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Fields of an uploaded image that clip2imgur uses
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
    /// Direct link to the image
    pub link: String,

    /// Imgur image id
    #[serde(default)]
    pub id: Option<String>,
}

/// Decoded answer to an upload request
#[derive(Debug, Clone)]
pub enum UploadResponse {
    /// HTTP 200 with `data.link`
    Success(UploadedImage),
    /// Any other status; the full body for diagnostics
    Error { status: u16, payload: serde_json::Value },
}

impl UploadResponse {
    /// Decode a response body according to its HTTP status.
    ///
    /// A non-JSON error body is kept as a JSON string. A 200 without
    /// `data.link` is an invalid response.
    pub fn decode(status: u16, body: &str) -> Result<Self, UploadError> {
        if status == 200 {
            let envelope: Envelope<UploadedImage> = serde_json::from_str(body).map_err(|e| {
                UploadError::InvalidResponse(format!(
                    "Failed to parse upload response: {}. Body was: {}",
                    e, body
                ))
            })?;
            return Ok(UploadResponse::Success(envelope.data));
        }

        let payload = serde_json::from_str(body)
            .unwrap_or_else(|_| serde_json::Value::String(body.to_string()));
        Ok(UploadResponse::Error { status, payload })
    }

    /// Turn the response into the image link or a rejection.
    pub fn into_link(self) -> Result<String, UploadError> {
        match self {
            UploadResponse::Success(image) => Ok(image.link),
            UploadResponse::Error { status, payload } => Err(UploadError::Rejected {
                status,
                body: payload,
            }),
        }
    }
}
