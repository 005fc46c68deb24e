//! Short URL storage
//!
//! [`UrlStore`] is the persistence seam used by the API. Identifier allocation is
//! atomic in every implementation: two concurrent creations never observe the
//! same next identifier.

mod memory;
mod postgres;

pub use memory::MemoryUrlStore;
pub use postgres::PgUrlStore;

use async_trait::async_trait;

use crate::{error::StoreResult, types::ShortUrlRecord};

#[async_trait]
pub trait UrlStore: Send + Sync + 'static {
    /// Exact-match lookup by canonical URL.
    async fn find_by_original(&self, original_url: &str) -> StoreResult<Option<ShortUrlRecord>>;

    /// Exact-match lookup by identifier.
    async fn find_by_short(&self, short_url: i64) -> StoreResult<Option<ShortUrlRecord>>;

    /// Allocate the next identifier (1 for an empty store, otherwise max + 1)
    /// and persist a record for `original_url`.
    ///
    /// If another writer created a record for the same URL first, that record
    /// is returned instead.
    async fn allocate_and_create(&self, original_url: &str) -> StoreResult<ShortUrlRecord>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> StoreResult<()>;
}
