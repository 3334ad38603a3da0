//! Parkcam Storage Library
//!
//! Turns stored photo references into URLs a browser can load. Buckets may be
//! private (signed, expiring URLs) or public; the materializer always tries a
//! signed URL first and falls back to the public URL, so it needs no bucket
//! visibility configuration.
//!
//! # Object keys
//!
//! A photo is addressed by `(bucket, key)`. Keys must not contain `..` or a
//! leading `/`; validation is centralized in the `keys` module so all backends
//! agree on what a usable key is.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod materialize;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_signer;
#[cfg(feature = "storage-local")]
pub use local::LocalSigner;
pub use materialize::{materialize, materialize_with_ttl, SIGNED_URL_TTL};
pub use parkcam_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Signer;
pub use traits::{StorageError, StorageResult, UrlSigner};
