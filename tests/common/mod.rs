//! Shared fixtures for handler integration tests.
//!
//! The real router is exercised end to end; storage, cache and the outbound
//! collaborators are replaced with in-memory fakes so tests need no Postgres,
//! Redis or network access.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use serde_json::json;

use blinklink::application::services::{AccountService, LinkService};
use blinklink::domain::entities::{NewShortLink, NewUser, ShortLink, User};
use blinklink::domain::repositories::{LinkRepository, UserRepository};
use blinklink::error::AppError;
use blinklink::infrastructure::cache::{CacheResult, CacheService};
use blinklink::infrastructure::geolocation::{GeoError, GeoLocation, GeoLocator};
use blinklink::infrastructure::reachability::{ProbeError, UrlProber};
use blinklink::routes::router;
use blinklink::state::AppState;

/// Registration password that elevates an account to admin in tests.
pub const ADMIN_SECRET: &str = "adm1nsecret";

/// In-memory link store keyed by short code.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<HashMap<String, ShortLink>>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a stored row, bypassing the service layer.
    pub fn stored(&self, code: &str) -> Option<ShortLink> {
        self.links.lock().unwrap().get(code).cloned()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut links = self.links.lock().unwrap();

        if links.contains_key(&new_link.short_code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "urls_short_code_key" }),
            ));
        }

        let link = ShortLink {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            short_code: new_link.short_code.clone(),
            original_url: new_link.original_url,
            created_at: new_link.created_at,
            last_updated_at: new_link.created_at,
            expiration_date: new_link.expiration_date,
            access_count: 0,
            accessed_locations: vec![],
            accessed_ips: vec![],
            last_latitude: None,
            last_longitude: None,
        };
        links.insert(new_link.short_code, link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.links.lock().unwrap().get(code).cloned())
    }

    async fn update_url(
        &self,
        code: &str,
        new_url: &str,
        updated_at: chrono::DateTime<Utc>,
    ) -> Result<Option<ShortLink>, AppError> {
        let mut links = self.links.lock().unwrap();

        Ok(links.get_mut(code).map(|link| {
            link.original_url = new_url.to_string();
            link.last_updated_at = updated_at;
            link.access_count = 0;
            link.clone()
        }))
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.links.lock().unwrap().remove(code).is_some())
    }

    async fn increment_access(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let mut links = self.links.lock().unwrap();

        Ok(links.get_mut(code).map(|link| {
            link.access_count += 1;
            link.clone()
        }))
    }

    async fn record_access(
        &self,
        code: &str,
        location: &str,
        ip: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<(), AppError> {
        let mut links = self.links.lock().unwrap();

        if let Some(link) = links.get_mut(code) {
            link.accessed_locations.push(location.to_string());
            link.accessed_ips.push(ip.to_string());
            link.last_latitude = Some(latitude);
            link.last_longitude = Some(longitude);
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// In-memory user store keyed by email.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(&self, email: &str) -> Option<User> {
        self.users.lock().unwrap().get(email).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();

        if users.contains_key(&new_user.email) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "users_email_key" }),
            ));
        }

        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            email: new_user.email.clone(),
            password_hash: new_user.password_hash,
            role: new_user.role.as_str().to_string(),
            created_at: Utc::now(),
        };
        users.insert(new_user.email, user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().get(email).cloned())
    }

    async fn delete_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.users.lock().unwrap().remove(email).is_some())
    }
}

/// In-memory cache with the same fail-open contract as the Redis one.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.lock().unwrap().contains_key(code)
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get(&self, short_code: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(short_code).cloned())
    }

    async fn set(
        &self,
        short_code: &str,
        payload: &str,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(short_code.to_string(), payload.to_string());
        Ok(())
    }

    async fn invalidate(&self, short_code: &str) -> CacheResult<()> {
        self.entries.lock().unwrap().remove(short_code);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Prober stub: reachable unless told otherwise.
pub struct StubProber {
    pub fail: bool,
}

#[async_trait]
impl UrlProber for StubProber {
    async fn probe(&self, url: &str) -> Result<(), ProbeError> {
        if self.fail {
            Err(ProbeError::Unreachable("connection refused".to_string()))
        } else if !url.starts_with("http://") && !url.starts_with("https://") {
            Err(ProbeError::InvalidUrl(url.to_string()))
        } else {
            Ok(())
        }
    }
}

/// Geolocator stub returning a fixed location, or failing.
pub struct StubGeoLocator {
    pub fail: bool,
}

#[async_trait]
impl GeoLocator for StubGeoLocator {
    async fn locate(&self, ip: IpAddr) -> Result<GeoLocation, GeoError> {
        if self.fail {
            return Err(GeoError::RequestFailed("provider down".to_string()));
        }

        Ok(GeoLocation {
            country: "Argentina".to_string(),
            region: "Buenos Aires".to_string(),
            ip: ip.to_string(),
            latitude: -34.6,
            longitude: -58.4,
        })
    }
}

/// A running test server plus handles onto the fakes behind it.
pub struct TestContext {
    pub server: TestServer,
    pub links: Arc<InMemoryLinkRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub cache: Arc<InMemoryCache>,
}

/// Builds a test server over the full router with default collaborators.
pub fn create_test_server() -> TestContext {
    create_test_server_with(false, false)
}

/// Builds a test server, optionally failing the prober or the geolocator.
pub fn create_test_server_with(prober_fails: bool, geo_fails: bool) -> TestContext {
    let links = Arc::new(InMemoryLinkRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let cache = Arc::new(InMemoryCache::new());

    let link_service = Arc::new(LinkService::new(
        links.clone(),
        cache.clone(),
        Arc::new(StubProber { fail: prober_fails }),
        Arc::new(StubGeoLocator { fail: geo_fails }),
    ));
    let account_service = Arc::new(AccountService::new(
        users.clone(),
        ADMIN_SECRET.to_string(),
    ));

    let state = AppState::new(link_service, account_service, cache.clone());

    // The redirect handler extracts ConnectInfo, so the server must run over
    // a real socket rather than the mock transport.
    let app = router(state).into_make_service_with_connect_info::<SocketAddr>();
    let server = TestServer::builder()
        .http_transport()
        .build(app)
        .expect("failed to start test server");

    TestContext {
        server,
        links,
        users,
        cache,
    }
}

/// Seeds a link directly through the repository, bypassing the probe.
pub async fn seed_link(ctx: &TestContext, code: &str, url: &str) -> ShortLink {
    let now = Utc::now();
    ctx.links
        .create(NewShortLink {
            short_code: code.to_string(),
            original_url: url.to_string(),
            created_at: now,
            expiration_date: now + chrono::Duration::days(69),
        })
        .await
        .unwrap()
}

/// Seeds a link whose expiration date is already in the past.
pub async fn seed_expired_link(ctx: &TestContext, code: &str, url: &str) -> ShortLink {
    let now = Utc::now();
    ctx.links
        .create(NewShortLink {
            short_code: code.to_string(),
            original_url: url.to_string(),
            created_at: now - chrono::Duration::days(70),
            expiration_date: now - chrono::Duration::days(1),
        })
        .await
        .unwrap()
}
