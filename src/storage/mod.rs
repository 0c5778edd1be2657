//! Storage bridge: presigned links and buffered object fetches against an
//! S3-compatible bucket, plus the messaging-service media upload.

pub mod messaging;
pub mod sign;

use once_cell::sync::Lazy;
use url::Url;

use crate::config::{self, StorageConfig};
use sign::{Credentials, PresignRequest};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage credentials not configured")]
    CredentialsMissing,
    #[error(transparent)]
    Sign(#[from] sign::SignError),
    #[error("object fetch failed: {0}")]
    Fetch(String),
    #[error("object fetch returned status {0}")]
    FetchStatus(u16),
    #[error("media upload failed: {0}")]
    Upload(String),
    #[error("media upload returned status {0}: {1}")]
    UploadStatus(u16, String),
}

pub struct S3Bridge {
    http: reqwest::Client,
    config: &'static StorageConfig,
}

impl S3Bridge {
    fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            config: &config::config().storage,
        }
    }

    /// Build a presigned GET link for a stored object key.
    pub fn presigned_url(&self, key: &str) -> Result<Url, StorageError> {
        let cfg = self.config;
        if cfg.access_key_id.is_empty() || cfg.secret_access_key.is_empty() {
            return Err(StorageError::CredentialsMissing);
        }

        let credentials = Credentials {
            access_key_id: cfg.access_key_id.clone(),
            secret_access_key: cfg.secret_access_key.clone(),
        };
        let request = PresignRequest {
            method: "GET",
            region: &cfg.region,
            bucket: &cfg.bucket,
            key,
            endpoint: cfg.endpoint.as_deref(),
            expires_secs: cfg.link_expiry_secs,
            time: None,
        };

        Ok(sign::presign(&credentials, &request)?)
    }

    /// Fetch an object's bytes through its presigned link.
    pub async fn fetch_object(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let url = self.presigned_url(key)?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| StorageError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::FetchStatus(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::Fetch(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

static BRIDGE: Lazy<S3Bridge> = Lazy::new(S3Bridge::new);

/// Global bridge instance, configured once at startup.
pub fn bridge() -> &'static S3Bridge {
    &BRIDGE
}
