//! Albumstore - a small in-memory album catalogue served over HTTP
//!
//! The crate provides:
//! - An ordered, lock-guarded album store with create/read/update/delete
//! - Startup seeding from a JSON file or a built-in list
//! - An axum router exposing the store under `/albums`

pub mod api;
pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use error::{Error, Result};
