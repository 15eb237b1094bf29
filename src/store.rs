//! Mail store collaborator — where the receiver parked the raw mail file.

use async_trait::async_trait;
use tracing::debug;

use crate::error::StoreError;

/// Read access to stored raw mail files.
///
/// Pure I/O, no mail knowledge. The pipeline calls `fetch` exactly once
/// per invocation, and only after the event has passed the scope gate.
#[async_trait]
pub trait MailStore: Send + Sync {
    /// Fetch the raw bytes of one stored mail.
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError>;
}

/// HTTP-backed mail store: objects exposed as `{base}/{bucket}/{key}`.
pub struct HttpMailStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpMailStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl MailStore for HttpMailStore {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        let url = format!("{}/{}/{}", self.base_url, bucket, key);
        debug!(%url, "Fetching stored mail");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(StoreError::UnexpectedStatus {
                bucket: bucket.to_string(),
                key: key.to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StoreError::RequestFailed {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        debug!(bucket, key, size = bytes.len(), "Fetched stored mail");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let store = HttpMailStore::new("http://localhost:9000/");
        assert_eq!(store.base_url, "http://localhost:9000");
    }
}
