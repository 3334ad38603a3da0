//! Parkcam Resolver
//!
//! Decides, from nothing but an uploaded photo's storage path, which park,
//! camera and attraction the photo belongs to.
//!
//! ```text
//! storage path ──decode──▶ DecodedIdentifier ──resolve──▶ ResolvedIdentity
//!                              (pure)            prefix → camera → attraction
//! ```
//!
//! [`preview`] strings both steps together for the ingestion-check tool. The
//! lookup tables are injected through the traits in [`lookup`], so the cascade
//! runs equally against Postgres (`parkcam-db`), an exported snapshot
//! ([`memory::MemoryStore`]) or a test fake.

pub mod cascade;
pub mod decode;
pub mod lookup;
pub mod memory;
pub mod photos;
pub mod preview;
pub mod strategy;

pub use cascade::{candidate_codes, resolve};
pub use decode::{decode, decode_with_speed_source, SpeedSource};
pub use lookup::{
    AttractionLookup, CameraLookup, CodeColumn, Lookups, PhotoQueryStrategy, PhotoSource,
    PrefixLookup, PHOTO_QUERY_STRATEGIES,
};
pub use memory::{MemoryStore, Snapshot, SnapshotPhoto};
pub use photos::{list_camera_photos, recent_camera_photos};
pub use preview::preview;
