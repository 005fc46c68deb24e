use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use super::UrlStore;
use crate::{
    error::{StoreError, StoreResult},
    types::ShortUrlRecord,
};

#[derive(Default)]
struct Records {
    by_short: BTreeMap<i64, String>,
    by_original: HashMap<String, i64>,
}

/// In-process store
///
/// Used by tests and by local runs with `DATABASE_URL=memory://`. Contents are
/// lost when the process exits.
#[derive(Default)]
pub struct MemoryUrlStore {
    records: Mutex<Records>,
}

impl MemoryUrlStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Records>> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UrlStore for MemoryUrlStore {
    async fn find_by_original(&self, original_url: &str) -> StoreResult<Option<ShortUrlRecord>> {
        let records = self.lock()?;
        Ok(records
            .by_original
            .get(original_url)
            .map(|&short_url| ShortUrlRecord::new(original_url, short_url)))
    }

    async fn find_by_short(&self, short_url: i64) -> StoreResult<Option<ShortUrlRecord>> {
        let records = self.lock()?;
        Ok(records
            .by_short
            .get(&short_url)
            .map(|original_url| ShortUrlRecord::new(original_url.clone(), short_url)))
    }

    async fn allocate_and_create(&self, original_url: &str) -> StoreResult<ShortUrlRecord> {
        let mut records = self.lock()?;

        if let Some(&short_url) = records.by_original.get(original_url) {
            return Ok(ShortUrlRecord::new(original_url, short_url));
        }

        let next_id = records
            .by_short
            .keys()
            .next_back()
            .map_or(1, |max| max + 1);

        records.by_short.insert(next_id, original_url.to_string());
        records.by_original.insert(original_url.to_string(), next_id);

        Ok(ShortUrlRecord::new(original_url, next_id))
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.lock().map(|_| ())
    }
}
