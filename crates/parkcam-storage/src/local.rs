use crate::keys::{validate_bucket, validate_key};
use crate::traits::{StorageError, StorageResult, UrlSigner};
use crate::StorageBackend;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;

/// Local filesystem URL signer
///
/// Objects live at `{base_path}/{bucket}/{key}` and are served from
/// `{base_url}/{bucket}/{key}`. Files served this way do not expire, so
/// "signing" only confirms the object exists.
#[derive(Clone)]
pub struct LocalSigner {
    base_path: PathBuf,
    base_url: String,
}

impl LocalSigner {
    /// Create a new LocalSigner
    ///
    /// # Arguments
    /// * `base_path` - Root directory holding one sub-directory per bucket
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:3000/storage")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        if !fs::try_exists(&base_path).await.unwrap_or(false) {
            return Err(StorageError::ConfigError(format!(
                "Storage directory {} does not exist",
                base_path.display()
            )));
        }

        Ok(LocalSigner {
            base_path,
            base_url,
        })
    }

    fn object_path(&self, bucket: &str, key: &str) -> StorageResult<PathBuf> {
        validate_bucket(bucket)?;
        validate_key(key)?;
        Ok(self.base_path.join(bucket).join(key))
    }

    /// Generate public URL for file
    fn generate_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.base_url.trim_end_matches('/'), bucket, key)
    }
}

#[async_trait]
impl UrlSigner for LocalSigner {
    async fn create_signed_urls(
        &self,
        bucket: &str,
        keys: &[String],
        _expires_in: Duration,
    ) -> StorageResult<HashMap<String, Option<String>>> {
        validate_bucket(bucket)?;
        let bucket_dir = self.base_path.join(bucket);
        fs::try_exists(&bucket_dir).await.map_err(|e| {
            StorageError::BackendError(format!(
                "Cannot read bucket directory {}: {}",
                bucket_dir.display(),
                e
            ))
        })?;

        let mut urls = HashMap::with_capacity(keys.len());
        for key in keys {
            let url = match self.object_path(bucket, key) {
                Ok(path) if fs::try_exists(&path).await.unwrap_or(false) => {
                    Some(self.generate_url(bucket, key))
                }
                Ok(path) => {
                    tracing::debug!(path = %path.display(), "Local object missing, not signing");
                    None
                }
                Err(e) => {
                    tracing::warn!(error = %e, bucket = %bucket, key = %key, "Refusing to sign invalid key");
                    None
                }
            };
            urls.insert(key.clone(), url);
        }

        Ok(urls)
    }

    fn public_url(&self, bucket: &str, key: &str) -> Option<String> {
        self.object_path(bucket, key)
            .ok()
            .map(|_| self.generate_url(bucket, key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
