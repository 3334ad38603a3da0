//! Postgres adapters for the parkcam lookup tables.

pub mod db;

pub use db::{
    create_pool, AttractionRepository, CameraRepository, PgStore, PhotoRepository,
    PrefixRepository,
};
