//! User registration, login and deletion.

use hmac::{Hmac, Mac};
use regex::Regex;
use serde_json::json;
use sha2::Sha256;
use std::sync::{Arc, LazyLock};

use crate::domain::entities::{NewUser, Role, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Length of the per-password random salt in bytes.
const SALT_LENGTH_BYTES: usize = 16;

/// Minimum password length.
const PASSWORD_MIN_LENGTH: usize = 8;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").unwrap());

/// Service for stateless account management.
///
/// Passwords are stored as `salt$mac` where `mac` is HMAC-SHA256 keyed by a
/// random per-password salt, both hex-encoded. No sessions or tokens are
/// issued; login and deletion are plain credential checks.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    admin_secret: String,
}

impl AccountService {
    /// Creates a new account service.
    ///
    /// `admin_secret` is the privileged registration password: a new account
    /// whose password matches it is created with the `admin` role.
    pub fn new(users: Arc<dyn UserRepository>, admin_secret: String) -> Self {
        Self {
            users,
            admin_secret,
        }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the email or password format is
    /// rejected, and [`AppError::Conflict`] if the email is already taken.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AppError> {
        if !EMAIL_REGEX.is_match(email) {
            return Err(AppError::bad_request(
                "Invalid email format",
                json!({ "field": "email" }),
            ));
        }

        validate_password(password)?;

        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict(
                "User already exists, please try again with a different email",
                json!({ "email": email }),
            ));
        }

        let role = if password == self.admin_secret {
            Role::Admin
        } else {
            Role::User
        };

        let new_user = NewUser {
            email: email.to_string(),
            password_hash: hash_password(password),
            role,
        };

        self.users.create(new_user).await
    }

    /// Checks credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on unknown email or wrong password.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AppError> {
        let user = self.users.find_by_email(email).await?;

        match user {
            Some(user) if verify_password(password, &user.password_hash) => Ok(()),
            _ => Err(AppError::unauthorized(
                "Invalid credentials",
                json!({ "email": email }),
            )),
        }
    }

    /// Deletes an account after an exact credential match.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] on unknown email or wrong password.
    pub async fn remove(&self, email: &str, password: &str) -> Result<(), AppError> {
        let user = self.users.find_by_email(email).await?;

        let matched = match user {
            Some(user) => verify_password(password, &user.password_hash),
            None => false,
        };

        if !matched {
            return Err(AppError::not_found(
                "User not found",
                json!({ "email": email }),
            ));
        }

        self.users.delete_by_email(email).await?;

        Ok(())
    }
}

/// Validates the password policy: at least 8 characters, ASCII letters and
/// digits only, with at least one of each.
///
/// Expressed as explicit checks because the policy's historical regex relies
/// on lookaheads, which the `regex` crate does not support.
fn validate_password(password: &str) -> Result<(), AppError> {
    let long_enough = password.len() >= PASSWORD_MIN_LENGTH;
    let alphanumeric = password.chars().all(|c| c.is_ascii_alphanumeric());
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if long_enough && alphanumeric && has_letter && has_digit {
        Ok(())
    } else {
        Err(AppError::bad_request(
            "Password must be at least 8 characters long and contain at least one letter and one number",
            json!({ "field": "password" }),
        ))
    }
}

/// Hashes a password with a fresh random salt.
///
/// Output format: `hex(salt)$hex(hmac_sha256(key = salt, msg = password))`.
fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LENGTH_BYTES];
    getrandom::fill(&mut salt).expect("Failed to generate random salt");

    let mut mac = HmacSha256::new_from_slice(&salt).expect("HMAC accepts any key length");
    mac.update(password.as_bytes());

    format!(
        "{}${}",
        hex::encode(salt),
        hex::encode(mac.finalize().into_bytes())
    )
}

/// Verifies a password against a stored `salt$mac` hash in constant time.
fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, mac_hex)) = stored.split_once('$') else {
        return false;
    };

    let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(mac_hex)) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(&salt) else {
        return false;
    };
    mac.update(password.as_bytes());

    mac.verify_slice(&expected).is_ok()
}
