//! Short link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened URL record with access telemetry.
///
/// `short_code` is globally unique and immutable for the record's lifetime.
/// A record whose `expiration_date` lies in the past is logically deleted:
/// it must not be served, and the read path that notices the expiry removes
/// it from storage.
///
/// The serde derives exist so the record can be cached as a point-in-time
/// JSON snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShortLink {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
    pub access_count: i64,
    pub accessed_locations: Vec<String>,
    pub accessed_ips: Vec<String>,
    pub last_latitude: Option<f64>,
    pub last_longitude: Option<f64>,
}

impl ShortLink {
    /// Returns true if the link has passed its expiration date.
    ///
    /// A link is valid iff `expiration_date >= now`.
    pub fn is_expired(&self) -> bool {
        self.expiration_date < Utc::now()
    }
}

/// Input data for creating a new short link.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_link(expiration_date: DateTime<Utc>) -> ShortLink {
        let now = Utc::now();
        ShortLink {
            id: 1,
            short_code: "a1b2c3".to_string(),
            original_url: "https://example.com".to_string(),
            created_at: now,
            last_updated_at: now,
            expiration_date,
            access_count: 0,
            accessed_locations: vec![],
            accessed_ips: vec![],
            last_latitude: None,
            last_longitude: None,
        }
    }

    #[test]
    fn test_link_not_expired() {
        let link = sample_link(Utc::now() + Duration::days(69));
        assert!(!link.is_expired());
    }

    #[test]
    fn test_link_expired() {
        let link = sample_link(Utc::now() - Duration::seconds(1));
        assert!(link.is_expired());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let link = sample_link(Utc::now() + Duration::days(69));

        let payload = serde_json::to_string(&link).unwrap();
        let restored: ShortLink = serde_json::from_str(&payload).unwrap();

        assert_eq!(restored, link);
    }
}
