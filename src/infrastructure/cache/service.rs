//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching serialized short link snapshots.
///
/// Implementations must be thread-safe and handle errors gracefully without
/// disrupting the application: a cache failure always degrades to a database
/// lookup, never to a request failure.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with per-entry TTL
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the cached snapshot for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(payload))` on cache hit
    /// - `Ok(None)` on cache miss or error (fail-open behavior)
    async fn get(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Stores a serialized snapshot with optional TTL override.
    ///
    /// # Errors
    ///
    /// Implementations log errors and return `Ok(())` so a failed cache
    /// population never fails the read that triggered it.
    async fn set(&self, short_code: &str, payload: &str, ttl_seconds: Option<u64>)
    -> CacheResult<()>;

    /// Removes a cached snapshot.
    ///
    /// Used when a link is updated or deleted so readers never observe a
    /// stale record for the remainder of the TTL window.
    async fn invalidate(&self, short_code: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
