use crate::keys::{validate_bucket, validate_key};
use crate::traits::{StorageError, StorageResult, UrlSigner};
use crate::StorageBackend;
use async_trait::async_trait;
use futures::future::join_all;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::Result as ObjectResult;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// S3 URL signer.
///
/// One `AmazonS3` client is built per bucket on first use and cached. Credentials
/// come from the standard AWS environment variables.
pub struct S3Signer {
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
    stores: Mutex<HashMap<String, AmazonS3>>,
}

impl S3Signer {
    /// Create a new S3Signer
    ///
    /// # Arguments
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn new(region: String, endpoint_url: Option<String>) -> Self {
        S3Signer {
            region,
            endpoint_url,
            stores: Mutex::new(HashMap::new()),
        }
    }

    fn store(&self, bucket: &str) -> StorageResult<AmazonS3> {
        let mut stores = self.stores.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(store) = stores.get(bucket) {
            return Ok(store.clone());
        }

        let mut builder = AmazonS3Builder::from_env()
            .with_region(self.region.clone())
            .with_bucket_name(bucket.to_string());

        if let Some(ref endpoint) = self.endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;
        stores.insert(bucket.to_string(), store.clone());
        Ok(store)
    }

    async fn sign_one(
        &self,
        store: &AmazonS3,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Option<String> {
        if validate_key(key).is_err() {
            tracing::warn!(bucket = %bucket, key = %key, "Refusing to sign invalid key");
            return None;
        }

        let location = Path::from(key.to_string());
        let url_result: ObjectResult<_> = store.signed_url(Method::GET, &location, expires_in).await;

        match url_result {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    bucket = %bucket,
                    key = %key,
                    "S3 presign failed"
                );
                None
            }
        }
    }

    /// Generate public URL for an S3 object
    ///
    /// For AWS S3, uses the standard format: https://{bucket}.s3.{region}.amazonaws.com/{key}
    /// For S3-compatible providers, uses path-style: {endpoint}/{bucket}/{key}
    fn generate_url(&self, bucket: &str, key: &str) -> String {
        if let Some(ref endpoint) = self.endpoint_url {
            let base_url = endpoint.trim_end_matches('/');
            format!("{}/{}/{}", base_url, bucket, key)
        } else {
            format!("https://{}.s3.{}.amazonaws.com/{}", bucket, self.region, key)
        }
    }
}

#[async_trait]
impl UrlSigner for S3Signer {
    async fn create_signed_urls(
        &self,
        bucket: &str,
        keys: &[String],
        expires_in: Duration,
    ) -> StorageResult<HashMap<String, Option<String>>> {
        validate_bucket(bucket)?;
        let start = std::time::Instant::now();
        let store = self.store(bucket)?;

        let signed = join_all(
            keys.iter()
                .map(|key| self.sign_one(&store, bucket, key, expires_in)),
        )
        .await;

        let urls: HashMap<String, Option<String>> = keys.iter().cloned().zip(signed).collect();

        tracing::debug!(
            bucket = %bucket,
            requested = keys.len(),
            signed = urls.values().filter(|u| u.is_some()).count(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 presign batch finished"
        );

        Ok(urls)
    }

    fn public_url(&self, bucket: &str, key: &str) -> Option<String> {
        if validate_bucket(bucket).is_err() || validate_key(key).is_err() {
            return None;
        }
        Some(self.generate_url(bucket, key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_aws_virtual_host_style() {
        let signer = S3Signer::new("eu-central-1".to_string(), None);
        assert_eq!(
            signer.public_url("photos", "plose/1963186224002020.jpg").as_deref(),
            Some("https://photos.s3.eu-central-1.amazonaws.com/plose/1963186224002020.jpg")
        );
    }

    #[test]
    fn public_url_custom_endpoint_path_style() {
        let signer = S3Signer::new(
            "us-east-1".to_string(),
            Some("http://localhost:9000/".to_string()),
        );
        assert_eq!(
            signer.public_url("photos", "a/b.jpg").as_deref(),
            Some("http://localhost:9000/photos/a/b.jpg")
        );
    }

    #[test]
    fn public_url_rejects_invalid_keys() {
        let signer = S3Signer::new("eu-central-1".to_string(), None);
        assert_eq!(signer.public_url("photos", "../secret"), None);
        assert_eq!(signer.public_url("", "a.jpg"), None);
    }
}
