//! URL signer abstraction
//!
//! This module defines the [`UrlSigner`] trait every storage backend implements.

use crate::StorageBackend;
use async_trait::async_trait;
use parkcam_core::AppError;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConfigError(msg) => AppError::Config(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Produces browser-loadable URLs for objects in named buckets.
#[async_trait]
pub trait UrlSigner: Send + Sync {
    /// Create time-limited GET URLs for a batch of keys in one bucket.
    ///
    /// Every requested key appears in the result; keys the backend declined to
    /// sign (missing object, permission, invalid key) map to `None`. `Err` is
    /// reserved for the whole batch failing.
    async fn create_signed_urls(
        &self,
        bucket: &str,
        keys: &[String],
        expires_in: Duration,
    ) -> StorageResult<HashMap<String, Option<String>>>;

    /// Derive the public URL of an object. Never touches the network, so it
    /// cannot tell whether the object exists or the bucket is public.
    fn public_url(&self, bucket: &str, key: &str) -> Option<String>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
