//! Configuration module
//!
//! Settings for the Postgres lookup store, the storage URL signer and the
//! operator tools. Values come from the process environment (with `.env`
//! support via `dotenvy`); [`Config::from_lookup`] takes any key lookup so the
//! parsing rules can be exercised without touching the real environment.

use std::env;
use std::time::Duration;

use crate::storage_types::StorageBackend;

// Common constants
const MAX_CONNECTIONS: u32 = 5;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const SIGNED_URL_TTL_SECS: u64 = 1800;
const PHOTO_PREVIEW_LIMIT: i64 = 12;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, Supabase storage, etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub signed_url_ttl_secs: u64,
    // Dashboard behavior
    pub photo_preview_limit: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup and validate it.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let database_url = non_empty("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let storage_backend = match non_empty("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::S3,
        };

        let config = Config {
            database_url,
            db_max_connections: non_empty("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: non_empty("DB_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            storage_backend,
            s3_region: non_empty("S3_REGION"),
            s3_endpoint: non_empty("S3_ENDPOINT"),
            aws_region: non_empty("AWS_REGION"),
            local_storage_path: non_empty("LOCAL_STORAGE_PATH"),
            local_storage_base_url: non_empty("LOCAL_STORAGE_BASE_URL"),
            signed_url_ttl_secs: non_empty("SIGNED_URL_TTL_SECS")
                .and_then(|s| s.parse().ok())
                .filter(|&ttl| ttl > 0)
                .unwrap_or(SIGNED_URL_TTL_SECS),
            photo_preview_limit: non_empty("PHOTO_PREVIEW_LIMIT")
                .and_then(|s| s.parse().ok())
                .filter(|&limit| limit > 0)
                .unwrap_or(PHOTO_PREVIEW_LIMIT),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.database_url.starts_with("postgresql://")
            && !self.database_url.starts_with("postgres://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }

    pub fn region(&self) -> Option<&str> {
        self.s3_region.as_deref().or(self.aws_region.as_deref())
    }

    pub fn signed_url_ttl(&self) -> Duration {
        Duration::from_secs(self.signed_url_ttl_secs)
    }

    pub fn db_timeout(&self) -> Duration {
        Duration::from_secs(self.db_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_for_s3() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/parkcam"),
            ("AWS_REGION", "eu-central-1"),
        ])
        .unwrap();

        assert_eq!(config.storage_backend, StorageBackend::S3);
        assert_eq!(config.region(), Some("eu-central-1"));
        assert_eq!(config.signed_url_ttl(), Duration::from_secs(1800));
        assert_eq!(config.photo_preview_limit, 12);
        assert_eq!(config.db_max_connections, 5);
    }

    #[test]
    fn s3_region_takes_precedence_over_aws_region() {
        let config = config_from(&[
            ("DATABASE_URL", "postgresql://localhost/parkcam"),
            ("S3_REGION", "us-east-1"),
            ("AWS_REGION", "eu-central-1"),
        ])
        .unwrap();
        assert_eq!(config.region(), Some("us-east-1"));
    }

    #[test]
    fn missing_database_url_is_rejected() {
        assert!(config_from(&[("AWS_REGION", "eu-central-1")]).is_err());
    }

    #[test]
    fn non_postgres_url_is_rejected() {
        let err = config_from(&[
            ("DATABASE_URL", "mysql://localhost/parkcam"),
            ("AWS_REGION", "eu-central-1"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("PostgreSQL"));
    }

    #[test]
    fn local_backend_requires_path_and_base_url() {
        let err = config_from(&[
            ("DATABASE_URL", "postgres://localhost/parkcam"),
            ("STORAGE_BACKEND", "local"),
            ("LOCAL_STORAGE_PATH", "/var/lib/parkcam"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("LOCAL_STORAGE_BASE_URL"));
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/parkcam"),
            ("AWS_REGION", "eu-central-1"),
            ("SIGNED_URL_TTL_SECS", "0"),
            ("PHOTO_PREVIEW_LIMIT", "lots"),
        ])
        .unwrap();
        assert_eq!(config.signed_url_ttl_secs, 1800);
        assert_eq!(config.photo_preview_limit, 12);
    }
}
