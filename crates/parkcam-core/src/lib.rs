//! Parkcam Core Library
//!
//! This crate provides the domain models, error types and configuration shared by
//! every parkcam component: the filename decoder and resolution cascade, the
//! Postgres lookup adapters, the storage URL signers and the operator CLI.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata};
pub use storage_types::StorageBackend;
