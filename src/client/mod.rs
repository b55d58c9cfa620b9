//! Imgur upload client

use async_trait::async_trait;

use crate::config::Credential;
use crate::error::Result;

pub mod imgur;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use imgur::ImgurClient;
#[cfg(test)]
pub use mock::MockImageHost;

/// How an upload identifies itself to Imgur
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    /// Application-level id; lands in the anonymous pool
    ClientId(String),
    /// User access token; lands in the authorized account
    Bearer(String),
}

impl Authorization {
    /// Pick the header scheme for an upload.
    ///
    /// Anonymous uploads, a missing credential and an expired credential all
    /// fall back to `Client-ID`. Never fails for lack of a credential.
    pub fn select(
        client_id: &str,
        credential: Option<&Credential>,
        anonymous: bool,
        now: i64,
    ) -> Self {
        match credential {
            Some(cred) if !anonymous && !cred.is_expired_at(now) => {
                Authorization::Bearer(cred.access_token.clone())
            }
            _ => Authorization::ClientId(client_id.to_string()),
        }
    }

    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        match self {
            Authorization::ClientId(id) => format!("Client-ID {}", id),
            Authorization::Bearer(token) => format!("Bearer {}", token),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Authorization::ClientId(_))
    }
}

/// Image hosting service
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload encoded image bytes in a single attempt and return the public link.
    async fn upload(&self, image: &[u8], auth: &Authorization) -> Result<String>;
}
