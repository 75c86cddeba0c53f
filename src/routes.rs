//! Router configuration for the HTTP surface.
//!
//! # Route Structure
//!
//! - `GET    /?short_code=..`     - Short link redirect (temporary, 307)
//! - `GET    /ping`               - Liveness probe
//! - `GET    /health`             - Health check: DB, cache
//! - `POST   /shorten?url=..`     - Create a short link
//! - `PUT    /shorten`            - Update a link's destination
//! - `GET    /shorten/{code}`     - Fetch link details
//! - `DELETE /shorten/{code}`     - Delete a link
//! - `POST   /register`           - Create a user account
//! - `POST   /login`              - Check credentials
//! - `DELETE /delete`             - Delete a user account
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use axum::Router;
use axum::routing::{delete, get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api::handlers::{
    create_link_handler, delete_link_handler, delete_user_handler, get_link_handler,
    health_handler, login_handler, ping_handler, redirect_handler, register_handler,
    update_link_handler,
};
use crate::api::middleware::tracing;
use crate::state::AppState;

/// Constructs the application router with all routes and the tracing layer.
///
/// Integration tests mount this router directly; [`app_router`] adds path
/// normalization for the real server.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(redirect_handler))
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        .route(
            "/shorten",
            post(create_link_handler).put(update_link_handler),
        )
        .route(
            "/shorten/{short_code}",
            get(get_link_handler).delete(delete_link_handler),
        )
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/delete", delete(delete_user_handler))
        .with_state(state)
        .layer(tracing::layer())
}

/// Wraps [`router`] with trailing-slash normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
