//! Database repositories for data access layer
//!
//! One repository per table consulted by the resolver. All of them are
//! read-only: parks, prefixes, cameras and attractions are maintained by
//! administrators elsewhere and photos are written by ingestion.
//
// Lookup repositories (prefix routing, cameras, attractions)
pub mod attraction;
pub mod camera;
pub mod prefix;
//
// Photo listing
pub mod photo;
//
// Pool setup and the combined store
pub mod store;

pub use attraction::AttractionRepository;
pub use camera::CameraRepository;
pub use photo::PhotoRepository;
pub use prefix::PrefixRepository;
pub use store::{create_pool, PgStore};
