use async_trait::async_trait;
use sqlx::PgPool;

use super::UrlStore;
use crate::{
    error::{StoreError, StoreResult},
    types::ShortUrlRecord,
};

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgUrlStore {
    pool: PgPool,
}

impl PgUrlStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlStore for PgUrlStore {
    async fn find_by_original(&self, original_url: &str) -> StoreResult<Option<ShortUrlRecord>> {
        let record = sqlx::query_as::<_, ShortUrlRecord>(
            "SELECT original_url, short_url FROM short_urls WHERE original_url = $1",
        )
        .bind(original_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_by_short(&self, short_url: i64) -> StoreResult<Option<ShortUrlRecord>> {
        let record = sqlx::query_as::<_, ShortUrlRecord>(
            "SELECT original_url, short_url FROM short_urls WHERE short_url = $1",
        )
        .bind(short_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn allocate_and_create(&self, original_url: &str) -> StoreResult<ShortUrlRecord> {
        let mut tx = self.pool.begin().await?;

        // Row lock on the counter is held until commit/rollback
        let (next_id,): (i64,) = sqlx::query_as(
            "UPDATE short_url_counter SET value = value + 1 WHERE id = TRUE RETURNING value",
        )
        .fetch_one(&mut *tx)
        .await?;

        let inserted = sqlx::query_as::<_, ShortUrlRecord>(
            r#"
            INSERT INTO short_urls (short_url, original_url)
            VALUES ($1, $2)
            RETURNING original_url, short_url
            "#,
        )
        .bind(next_id)
        .bind(original_url)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(record) => {
                tx.commit().await?;
                Ok(record)
            }
            Err(err) => {
                // Rolling back also returns the identifier to the counter
                tx.rollback().await?;
                match StoreError::from(err) {
                    StoreError::Conflict(detail) => {
                        tracing::debug!(
                            original_url = %original_url,
                            detail = %detail,
                            "Concurrent insert for the same URL, returning existing record"
                        );
                        self.find_by_original(original_url)
                            .await?
                            .ok_or(StoreError::Conflict(detail))
                    }
                    other => Err(other),
                }
            }
        }
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
