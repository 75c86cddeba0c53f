//! Handler for the short URL redirect hot path.

use axum::{
    extract::{ConnectInfo, Query, State},
    response::Redirect,
};
use std::net::SocketAddr;

use crate::api::dto::link::RedirectParams;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL, recording the access.
///
/// # Endpoint
///
/// `GET /?short_code=<code>`
///
/// # Request Flow
///
/// 1. Resolve the record straight from the store (the cache is bypassed so
///    the counter increment always sees the freshest state)
/// 2. Atomically increment the access counter
/// 3. Best-effort geolocation of the caller; on success the location and IP
///    are appended to the record's telemetry and per-region counters are
///    bumped
/// 4. 307 Temporary Redirect to the original URL
///
/// # Errors
///
/// Returns 404 Not Found if the code is absent or expired. A geolocation
/// failure does not fail the redirect.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Query(params): Query<RedirectParams>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Redirect, AppError> {
    let url = state
        .link_service
        .redirect(&params.short_code, addr.ip())
        .await?;

    Ok(Redirect::temporary(&url))
}
