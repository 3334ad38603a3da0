//! Data models for parkcam
//!
//! Value objects produced by the decoder and cascade, the read-only rows owned
//! by the backing store, and the photo references handled by the URL
//! materializer.

mod identifier;
mod identity;
mod park;
mod photo;

// Re-export all models for convenient imports
pub use identifier::*;
pub use identity::*;
pub use park::*;
pub use photo::*;
