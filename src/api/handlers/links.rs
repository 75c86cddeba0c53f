//! Handlers for short link CRUD endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::link::{LinkResponse, ShortenParams, UpdateParams};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a new short link.
///
/// # Endpoint
///
/// `POST /shorten?url=<long-url>`
///
/// The URL must answer a reachability probe before the link is created.
///
/// # Errors
///
/// - **400**: URL is malformed or unreachable
/// - **409**: generated code collided with an existing one
pub async fn create_link_handler(
    State(state): State<AppState>,
    Query(params): Query<ShortenParams>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.create(&params.url).await?;

    Ok(Json(LinkResponse::from(&link)))
}

/// Fetches a link's metadata via the cache-aside path.
///
/// # Endpoint
///
/// `GET /shorten/{code}`
///
/// Served from cache for up to the snapshot TTL; the cached copy does not
/// reflect redirect increments made since it was cached.
///
/// # Errors
///
/// - **404**: code is absent or expired (expired records are deleted on sight)
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get(&code).await?;

    Ok(Json(LinkResponse::from(&link)))
}

/// Replaces a link's target URL.
///
/// # Endpoint
///
/// `PUT /shorten?short_code=<code>&url=<new-url>`
///
/// Resets the access counter and `last_updated_at`; creation and expiration
/// timestamps survive. The cache entry is invalidated.
///
/// # Errors
///
/// - **404**: code is absent or expired
/// - **409**: new URL equals the current one
/// - **400**: new URL lacks an `http(s)://` prefix
pub async fn update_link_handler(
    State(state): State<AppState>,
    Query(params): Query<UpdateParams>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state
        .link_service
        .update(&params.short_code, &params.url)
        .await?;

    Ok(Json(LinkResponse::from(&link)))
}

/// Deletes a short link.
///
/// # Endpoint
///
/// `DELETE /shorten/{code}`
///
/// # Errors
///
/// - **404**: code is absent
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete(&code).await?;

    Ok(StatusCode::NO_CONTENT)
}
