#[cfg(feature = "storage-local")]
use crate::LocalSigner;
#[cfg(feature = "storage-s3")]
use crate::S3Signer;
use crate::{StorageBackend, StorageError, StorageResult, UrlSigner};
use parkcam_core::Config;
use std::sync::Arc;

/// Create a URL signer based on configuration
pub async fn create_signer(config: &Config) -> StorageResult<Arc<dyn UrlSigner>> {
    match config.storage_backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let region = config.region().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;
            let endpoint = config.s3_endpoint.clone();

            tracing::info!(region = %region, endpoint = ?endpoint, "Using S3 URL signer");
            Ok(Arc::new(S3Signer::new(region, endpoint)))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let base_url = config.local_storage_base_url.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
            })?;

            tracing::info!(base_path = %base_path, "Using local URL signer");
            let signer = LocalSigner::new(base_path, base_url).await?;
            Ok(Arc::new(signer))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}

#[cfg(all(test, feature = "storage-local", feature = "storage-s3"))]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    #[tokio::test]
    async fn creates_s3_signer_from_region() {
        let config = config(&[
            ("DATABASE_URL", "postgres://localhost/parkcam"),
            ("AWS_REGION", "eu-central-1"),
        ]);
        let signer = create_signer(&config).await.unwrap();
        assert_eq!(signer.backend_type(), StorageBackend::S3);
    }

    #[tokio::test]
    async fn creates_local_signer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().to_string();
        let config = config(&[
            ("DATABASE_URL", "postgres://localhost/parkcam"),
            ("STORAGE_BACKEND", "local"),
            ("LOCAL_STORAGE_PATH", path.as_str()),
            ("LOCAL_STORAGE_BASE_URL", "http://localhost:3000/storage"),
        ]);
        let signer = create_signer(&config).await.unwrap();
        assert_eq!(signer.backend_type(), StorageBackend::Local);
    }
}
