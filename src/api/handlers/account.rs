//! Handlers for user account endpoints.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::api::dto::account::{CredentialsParams, MessageResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new user.
///
/// # Endpoint
///
/// `POST /register?email=<email>&password=<password>`
///
/// A password matching the configured admin secret elevates the account to
/// the `admin` role.
///
/// # Errors
///
/// - **400**: email or password format rejected
/// - **409**: email already registered
pub async fn register_handler(
    State(state): State<AppState>,
    Query(params): Query<CredentialsParams>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    state
        .account_service
        .register(&params.email, &params.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created",
        }),
    ))
}

/// Checks credentials. No session or token is issued.
///
/// # Endpoint
///
/// `POST /login?email=<email>&password=<password>`
///
/// # Errors
///
/// - **401**: unknown email or wrong password
pub async fn login_handler(
    State(state): State<AppState>,
    Query(params): Query<CredentialsParams>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .account_service
        .login(&params.email, &params.password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Login successful",
    }))
}

/// Deletes a user after an exact credential match.
///
/// # Endpoint
///
/// `DELETE /delete?email=<email>&password=<password>`
///
/// # Errors
///
/// - **404**: unknown email or wrong password
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Query(params): Query<CredentialsParams>,
) -> Result<StatusCode, AppError> {
    state
        .account_service
        .remove(&params.email, &params.password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
