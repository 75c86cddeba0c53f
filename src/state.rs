//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::application::services::{AccountService, LinkService};
use crate::infrastructure::cache::CacheService;

/// Shared state available to all handlers.
///
/// Holds the service layer behind `Arc` so the state stays cheap to clone
/// per request.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub account_service: Arc<AccountService>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        account_service: Arc<AccountService>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            link_service,
            account_service,
            cache,
        }
    }
}
