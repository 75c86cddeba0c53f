//! Geolocation collaborator for redirect telemetry.
//!
//! Wraps the ipgeolocation.io HTTP API behind a [`GeoLocator`] trait so the
//! redirect path can treat it as a best-effort external collaborator.

use async_trait::async_trait;
use serde::Deserialize;
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;

/// Default endpoint of the geolocation provider.
const IPGEOLOCATION_ENDPOINT: &str = "https://api.ipgeolocation.io/ipgeo";

/// Timeout for geolocation lookups. Telemetry must never stall a redirect
/// for long.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors that can occur during a geolocation lookup.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("Geolocation request failed: {0}")]
    RequestFailed(String),

    #[error("Geolocation response malformed: {0}")]
    MalformedResponse(String),
}

/// Resolved geolocation data for one requester.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoLocation {
    pub country: String,
    pub region: String,
    pub ip: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    /// The "country, region" label appended to a link's telemetry array.
    pub fn location_label(&self) -> String {
        format!("{}, {}", self.country, self.region)
    }
}

/// Trait for resolving a requester's network identity to a coarse location.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// Looks up geolocation data for the given client IP.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] on network failure or an unparseable response.
    /// Callers on the redirect path treat any error as "no telemetry for
    /// this access", never as a request failure.
    async fn locate(&self, ip: IpAddr) -> Result<GeoLocation, GeoError>;
}

/// Wire format of the ipgeolocation.io response.
///
/// The provider serializes latitude/longitude as decimal strings.
#[derive(Debug, Deserialize)]
struct IpGeoResponse {
    country_name: String,
    state_prov: String,
    ip: String,
    latitude: String,
    longitude: String,
}

/// HTTP client for the ipgeolocation.io API.
pub struct IpGeolocationClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl IpGeolocationClient {
    /// Creates a client authenticated with the given API key.
    pub fn new(api_key: String) -> Result<Self, GeoError> {
        let http = reqwest::Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .map_err(|e| GeoError::RequestFailed(e.to_string()))?;

        Ok(Self {
            http,
            api_key,
            endpoint: IPGEOLOCATION_ENDPOINT.to_string(),
        })
    }

    /// Overrides the provider endpoint. Used by tests against a local stub.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl GeoLocator for IpGeolocationClient {
    async fn locate(&self, ip: IpAddr) -> Result<GeoLocation, GeoError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("apiKey", self.api_key.as_str()), ("ip", &ip.to_string())])
            .send()
            .await
            .map_err(|e| GeoError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeoError::RequestFailed(format!(
                "provider returned HTTP {}",
                response.status()
            )));
        }

        let body: IpGeoResponse = response
            .json()
            .await
            .map_err(|e| GeoError::MalformedResponse(e.to_string()))?;

        let latitude: f64 = body
            .latitude
            .parse()
            .map_err(|_| GeoError::MalformedResponse(format!("latitude {:?}", body.latitude)))?;
        let longitude: f64 = body
            .longitude
            .parse()
            .map_err(|_| GeoError::MalformedResponse(format!("longitude {:?}", body.longitude)))?;

        debug!(
            "Geolocated {} to {}, {}",
            body.ip, body.country_name, body.state_prov
        );

        Ok(GeoLocation {
            country: body.country_name,
            region: body.state_prov,
            ip: body.ip,
            latitude,
            longitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_label_format() {
        let geo = GeoLocation {
            country: "Argentina".to_string(),
            region: "Buenos Aires".to_string(),
            ip: "203.0.113.7".to_string(),
            latitude: -34.6,
            longitude: -58.4,
        };

        assert_eq!(geo.location_label(), "Argentina, Buenos Aires");
    }

    #[test]
    fn test_wire_format_parses_string_coordinates() {
        let body: IpGeoResponse = serde_json::from_str(
            r#"{
                "country_name": "Argentina",
                "state_prov": "Buenos Aires",
                "ip": "203.0.113.7",
                "latitude": "-34.60370",
                "longitude": "-58.38160"
            }"#,
        )
        .unwrap();

        assert_eq!(body.country_name, "Argentina");
        assert_eq!(body.latitude.parse::<f64>().unwrap(), -34.6037);
    }
}
