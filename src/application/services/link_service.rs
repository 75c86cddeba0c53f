//! Link creation, lookup, mutation and redirect orchestration.

use std::net::IpAddr;
use std::sync::Arc;

use chrono::{Duration, Utc};
use metrics::counter;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::geolocation::GeoLocator;
use crate::infrastructure::reachability::UrlProber;
use crate::utils::code_generator::generate_code;

/// Fixed lifetime of a short link from its creation.
const LINK_LIFETIME_DAYS: i64 = 69;

/// Service for creating, resolving and mutating short links.
///
/// Reads for metadata go through a cache-aside path; the redirect hot path
/// always hits the store so the access counter is read against the freshest
/// state. Expiration is enforced lazily on every read path: a read that
/// perceives an expired record deletes it before reporting `NotFound`.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheService>,
    prober: Arc<dyn UrlProber>,
    geo: Arc<dyn GeoLocator>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        prober: Arc<dyn UrlProber>,
        geo: Arc<dyn GeoLocator>,
    ) -> Self {
        Self {
            links,
            cache,
            prober,
            geo,
        }
    }

    /// Creates a short link for a reachable URL.
    ///
    /// The URL is probed first; any network failure or non-2xx/3xx response
    /// means the URL is not worth shortening. One random 6-hex-char code is
    /// generated; a collision fails the request rather than regenerating.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is malformed or
    /// unreachable. Returns [`AppError::Conflict`] if the generated code
    /// already exists.
    pub async fn create(&self, url: &str) -> Result<ShortLink, AppError> {
        self.prober.probe(url).await.map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        let code = generate_code();

        // Single attempt only. The unique index backs this check up, so a
        // racing insert still surfaces as a conflict.
        if self.links.find_by_code(&code).await?.is_some() {
            return Err(AppError::conflict(
                "Short code already exists",
                json!({ "short_code": code }),
            ));
        }

        let created_at = Utc::now();
        let new_link = NewShortLink {
            short_code: code,
            original_url: url.to_string(),
            created_at,
            expiration_date: created_at + Duration::days(LINK_LIFETIME_DAYS),
        };

        self.links.create(new_link).await
    }

    /// Retrieves a link's metadata via the cache-aside path.
    ///
    /// On a cache hit the snapshot is served without touching the store, so
    /// it does not reflect access-count increments made by redirects since it
    /// was cached. On a miss the store is read, expiry enforced, and the
    /// cache populated with the configured TTL. Cache population is
    /// fail-open: its failure never fails the read.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is absent or expired.
    pub async fn get(&self, code: &str) -> Result<ShortLink, AppError> {
        if let Ok(Some(payload)) = self.cache.get(code).await {
            match serde_json::from_str::<ShortLink>(&payload) {
                Ok(link) => return Ok(link),
                Err(e) => {
                    // Unreadable snapshot: treat as a miss and refresh below.
                    warn!("Discarding corrupt cache entry for {}: {}", code, e);
                }
            }
        }

        let link = self.find_valid(code).await?;

        match serde_json::to_string(&link) {
            Ok(payload) => {
                let _ = self.cache.set(code, &payload, None).await;
            }
            Err(e) => warn!("Failed to serialize snapshot for {}: {}", code, e),
        }

        Ok(link)
    }

    /// Replaces a link's target URL.
    ///
    /// Resets `last_updated_at` and zeroes `access_count`; `created_at`, the
    /// expiration date and the telemetry arrays are untouched. The cache key
    /// is invalidated so readers don't observe the pre-update record for the
    /// rest of the TTL window.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is absent or expired,
    /// [`AppError::Conflict`] if `new_url` equals the current target, and
    /// [`AppError::Validation`] if `new_url` lacks an `http(s)://` prefix.
    pub async fn update(&self, code: &str, new_url: &str) -> Result<ShortLink, AppError> {
        let link = self.find_valid(code).await?;

        if new_url == link.original_url {
            return Err(AppError::conflict(
                "New URL is the same as the current URL",
                json!({ "url": new_url }),
            ));
        }

        if !new_url.starts_with("http://") && !new_url.starts_with("https://") {
            return Err(AppError::bad_request(
                "Invalid URL, please include 'http://' or 'https://' in front of the URL",
                json!({ "url": new_url }),
            ));
        }

        let updated = self
            .links
            .update_url(code, new_url, Utc::now())
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short code not found", json!({ "short_code": code }))
            })?;

        let _ = self.cache.invalidate(code).await;

        Ok(updated)
    }

    /// Deletes a link and invalidates its cache entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is absent.
    pub async fn delete(&self, code: &str) -> Result<(), AppError> {
        let removed = self.links.delete(code).await?;

        if !removed {
            return Err(AppError::not_found(
                "Short code not found",
                json!({ "short_code": code }),
            ));
        }

        let _ = self.cache.invalidate(code).await;

        Ok(())
    }

    /// Resolves a short code for redirection and records the access.
    ///
    /// Bypasses the cache entirely: the increment must run against the
    /// freshest store state, and it does so as one atomic update. The
    /// geolocation lookup is best-effort; on failure the redirect is still
    /// served and only the telemetry write is skipped.
    ///
    /// Returns the target URL to redirect to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is absent or expired.
    pub async fn redirect(&self, code: &str, client_ip: IpAddr) -> Result<String, AppError> {
        let _ = self.find_valid(code).await?;

        // The row can vanish between the validity check and the increment
        // (concurrent delete or expiry sweep); that is a plain not-found.
        let link = self.links.increment_access(code).await?.ok_or_else(|| {
            AppError::not_found("Short code not found", json!({ "short_code": code }))
        })?;

        match self.geo.locate(client_ip).await {
            Ok(geo) => {
                counter!(
                    "link_accesses_total",
                    "country" => geo.country.clone(),
                    "region" => geo.region.clone(),
                )
                .increment(1);

                if let Err(e) = self
                    .links
                    .record_access(
                        code,
                        &geo.location_label(),
                        &geo.ip,
                        geo.latitude,
                        geo.longitude,
                    )
                    .await
                {
                    warn!("Failed to record access telemetry for {}: {}", code, e);
                }
            }
            Err(e) => {
                warn!("Geolocation lookup failed for {}: {}", code, e);
            }
        }

        debug!(
            "Redirecting {} -> {} (access #{})",
            code, link.original_url, link.access_count
        );

        Ok(link.original_url)
    }

    /// Reports store connectivity for the health endpoint.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.links.ping().await
    }

    /// Looks up a code and enforces the expiry invariant.
    ///
    /// An expired record is deleted on sight; the deletion is idempotent so
    /// a concurrent reader racing on the same expiry is harmless.
    async fn find_valid(&self, code: &str) -> Result<ShortLink, AppError> {
        let link = self.links.find_by_code(code).await?.ok_or_else(|| {
            AppError::not_found("Short code not found", json!({ "short_code": code }))
        })?;

        if link.is_expired() {
            let _ = self.links.delete(code).await?;
            let _ = self.cache.invalidate(code).await;

            return Err(AppError::not_found(
                "Short code has expired",
                json!({ "short_code": code }),
            ));
        }

        Ok(link)
    }
}
