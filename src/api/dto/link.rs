//! DTOs for the short link endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::entities::ShortLink;
use crate::utils::time_format::format_timestamp;

/// Query parameters for `POST /shorten`.
#[derive(Debug, Deserialize)]
pub struct ShortenParams {
    pub url: String,
}

/// Query parameters for `PUT /shorten`.
#[derive(Debug, Deserialize)]
pub struct UpdateParams {
    pub short_code: String,
    pub url: String,
}

/// Query parameters for the redirect endpoint `GET /?short_code=`.
#[derive(Debug, Deserialize)]
pub struct RedirectParams {
    pub short_code: String,
}

/// JSON representation of a short link record.
///
/// Timestamps are rendered as `"YYYY-MM-DD HH:MM:SS AM/PM"`; telemetry
/// arrays and coordinates are internal and never exposed here.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkResponse {
    pub short_code: String,
    pub original_url: String,
    pub created_at: String,
    pub last_updated_at: String,
    pub expiration_date: String,
    pub access_count: i64,
}

impl From<&ShortLink> for LinkResponse {
    fn from(link: &ShortLink) -> Self {
        Self {
            short_code: link.short_code.clone(),
            original_url: link.original_url.clone(),
            created_at: format_timestamp(&link.created_at),
            last_updated_at: format_timestamp(&link.last_updated_at),
            expiration_date: format_timestamp(&link.expiration_date),
            access_count: link.access_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_link_response_shape() {
        let created = Utc.with_ymd_and_hms(2024, 7, 1, 16, 20, 5).unwrap();
        let link = ShortLink {
            id: 1,
            short_code: "a1b2c3".to_string(),
            original_url: "https://example.com".to_string(),
            created_at: created,
            last_updated_at: created,
            expiration_date: created + Duration::days(69),
            access_count: 3,
            accessed_locations: vec!["Argentina, Buenos Aires".to_string()],
            accessed_ips: vec!["203.0.113.7".to_string()],
            last_latitude: Some(-34.6),
            last_longitude: Some(-58.4),
        };

        let body = serde_json::to_value(LinkResponse::from(&link)).unwrap();

        assert_eq!(body["short_code"], "a1b2c3");
        assert_eq!(body["original_url"], "https://example.com");
        assert_eq!(body["created_at"], "2024-07-01 16:20:05 PM");
        assert_eq!(body["expiration_date"], "2024-09-08 16:20:05 PM");
        assert_eq!(body["access_count"], 3);

        // Telemetry stays internal.
        assert!(body.get("accessed_ips").is_none());
        assert!(body.get("accessed_locations").is_none());
    }
}
