//! Core record types

use serde::{Deserialize, Serialize};

/// A persisted mapping from a short numeric identifier to a canonical URL.
///
/// Both fields are unique across the store. Records are created once and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShortUrlRecord {
    /// Canonical absolute URL, always with an explicit scheme
    pub original_url: String,
    /// Identifier allocated from 1 upwards
    pub short_url: i64,
}

impl ShortUrlRecord {
    pub fn new(original_url: impl Into<String>, short_url: i64) -> Self {
        Self {
            original_url: original_url.into(),
            short_url,
        }
    }
}
