//! User account entity.

use chrono::{DateTime, Utc};

/// Account role, decided once at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Database representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Parses the database representation. Unknown values fall back to `user`.
    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

/// A registered user.
///
/// `email` is the unique identifier. `password_hash` holds the salted
/// HMAC-SHA256 digest produced by the account service; the raw password is
/// never stored. Accounts are created and deleted, never updated.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Role {
        Role::from_str_or_default(&self.role)
    }
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!(Role::from_str_or_default(Role::Admin.as_str()), Role::Admin);
        assert_eq!(Role::from_str_or_default(Role::User.as_str()), Role::User);
    }

    #[test]
    fn test_unknown_role_defaults_to_user() {
        assert_eq!(Role::from_str_or_default("superuser"), Role::User);
    }

    #[test]
    fn test_user_role_accessor() {
        let user = User {
            id: 1,
            email: "someone@example.com".to_string(),
            password_hash: "salt$mac".to_string(),
            role: "admin".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(user.role(), Role::Admin);
    }
}
