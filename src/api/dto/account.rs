//! DTOs for the account endpoints.

use serde::{Deserialize, Serialize};

/// Query parameters shared by register, login and delete.
#[derive(Debug, Deserialize)]
pub struct CredentialsParams {
    pub email: String,
    pub password: String,
}

/// Simple confirmation body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
