//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, map_sqlx_error};

const LINK_COLUMNS: &str = "id, short_code, original_url, created_at, last_updated_at, \
     expiration_date, access_count, accessed_locations, accessed_ips, \
     last_latitude, last_longitude";

/// PostgreSQL repository for short link storage and retrieval.
///
/// Uses runtime-checked prepared statements over a shared connection pool;
/// every operation acquires and releases its connection through the pool.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let row = sqlx::query_as::<_, ShortLink>(&format!(
            r#"
            INSERT INTO urls (short_code, original_url, created_at, last_updated_at, expiration_date)
            VALUES ($1, $2, $3, $3, $4)
            RETURNING {LINK_COLUMNS}
            "#,
        ))
        .bind(&new_link.short_code)
        .bind(&new_link.original_url)
        .bind(new_link.created_at)
        .bind(new_link.expiration_date)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, ShortLink>(&format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM urls
            WHERE short_code = $1
            "#,
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row)
    }

    async fn update_url(
        &self,
        code: &str,
        new_url: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, ShortLink>(&format!(
            r#"
            UPDATE urls
            SET original_url = $2, last_updated_at = $3, access_count = 0
            WHERE short_code = $1
            RETURNING {LINK_COLUMNS}
            "#,
        ))
        .bind(code)
        .bind(new_url)
        .bind(updated_at)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row)
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_access(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        // Single statement so concurrent redirects never lose increments.
        let row = sqlx::query_as::<_, ShortLink>(&format!(
            r#"
            UPDATE urls
            SET access_count = access_count + 1
            WHERE short_code = $1
            RETURNING {LINK_COLUMNS}
            "#,
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row)
    }

    async fn record_access(
        &self,
        code: &str,
        location: &str,
        ip: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE urls
            SET accessed_locations = array_append(accessed_locations, $2),
                accessed_ips = array_append(accessed_ips, $3),
                last_latitude = $4,
                last_longitude = $5
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .bind(location)
        .bind(ip)
        .bind(latitude)
        .bind(longitude)
        .execute(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
