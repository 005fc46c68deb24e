//! ShortURL Shared Types and Storage
//!
//! This crate contains the short URL record type, the storage abstraction and
//! its PostgreSQL and in-memory implementations.

pub mod db;
pub mod error;
pub mod store;
pub mod types;

pub use db::*;
pub use error::*;
pub use store::{MemoryUrlStore, PgUrlStore, UrlStore};
pub use types::*;
