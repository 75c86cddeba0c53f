//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for managing short links.
///
/// The store is the single source of truth; the read-modify-write sequences
/// the service needs on the hot path are expressed as single atomic
/// operations here ([`Self::increment_access`], [`Self::record_access`]).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new short link with `access_count = 0` and empty telemetry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by its short code.
    ///
    /// Expired rows are returned as-is; expiry policy lives in the service.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Replaces the target URL, resets `last_updated_at` and zeroes
    /// `access_count`. `created_at`, `expiration_date` and the telemetry
    /// arrays are left untouched.
    ///
    /// Returns `Ok(None)` if no row matches the code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_url(
        &self,
        code: &str,
        new_url: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<ShortLink>, AppError>;

    /// Deletes a link by code.
    ///
    /// Idempotent: returns `Ok(true)` if a row was removed, `Ok(false)` if it
    /// was already absent. Concurrent expiry sweeps rely on the no-op case.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Atomically increments `access_count` and returns the updated row.
    ///
    /// Single `UPDATE ... RETURNING`, so concurrent redirects never lose
    /// increments. Returns `Ok(None)` if the row vanished in the meantime.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_access(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Appends one access telemetry entry: location and IP are pushed onto
    /// the parallel arrays, latitude/longitude overwrite the last-known pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_access(
        &self,
        code: &str,
        location: &str,
        ip: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<(), AppError>;

    /// Cheap connectivity probe used by the health endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
