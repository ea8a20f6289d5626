//! IP geolocation lookups.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use pixeltrace_core::config::geolocation::GeolocationConfig;
use pixeltrace_core::error::AppError;
use pixeltrace_core::result::AppResult;
use pixeltrace_core::types::GeoLocation;

/// Resolves a client address to a location.
#[async_trait]
pub trait GeoLocator: Send + Sync + std::fmt::Debug {
    /// Returns `None` for unresolvable, private, or malformed addresses and
    /// for any lookup failure.
    async fn locate(&self, ip: &str) -> Option<GeoLocation>;
}

/// Locator used when lookups are switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGeoLocator;

#[async_trait]
impl GeoLocator for DisabledGeoLocator {
    async fn locate(&self, _ip: &str) -> Option<GeoLocation> {
        None
    }
}

/// Locator backed by an `ip-api.com`-compatible JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpGeoLocator {
    client: reqwest::Client,
    /// URL template containing `{ip}`.
    endpoint: String,
}

/// Subset of the `ip-api.com` response we read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IpApiResponse {
    status: Option<String>,
    country_code: Option<String>,
    region_name: Option<String>,
    city: Option<String>,
    timezone: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl HttpGeoLocator {
    /// Builds a locator from configuration.
    pub fn new(config: &GeolocationConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build geo client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    fn url_for(&self, ip: &IpAddr) -> String {
        self.endpoint.replace("{ip}", &ip.to_string())
    }

    async fn fetch(&self, ip: &IpAddr) -> Result<IpApiResponse, reqwest::Error> {
        self.client
            .get(self.url_for(ip))
            .send()
            .await?
            .error_for_status()?
            .json::<IpApiResponse>()
            .await
    }
}

#[async_trait]
impl GeoLocator for HttpGeoLocator {
    async fn locate(&self, ip: &str) -> Option<GeoLocation> {
        let addr = ip.parse::<IpAddr>().ok().filter(is_public)?;

        let response = match self.fetch(&addr).await {
            Ok(response) => response,
            Err(e) => {
                debug!(ip, error = %e, "Geolocation lookup failed");
                return None;
            }
        };

        into_location(response)
    }
}

fn into_location(response: IpApiResponse) -> Option<GeoLocation> {
    if response.status.as_deref().is_some_and(|s| s != "success") {
        return None;
    }

    let location = GeoLocation {
        country: response.country_code,
        region: response.region_name,
        city: response.city,
        timezone: response.timezone,
        latitude: response.lat,
        longitude: response.lon,
    };

    (!location.is_empty()).then_some(location)
}

/// Addresses worth sending to a public lookup service.
fn is_public(addr: &IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => {
            !(v4.is_private()
                || v4.is_loopback()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
                || v4.is_documentation())
        }
        IpAddr::V6(v6) => {
            if let Some(mapped) = v6.to_ipv4_mapped() {
                return is_public(&IpAddr::V4(mapped));
            }
            let first = v6.segments()[0];
            let unique_local = first & 0xfe00 == 0xfc00;
            let link_local = first & 0xffc0 == 0xfe80;
            !(v6.is_loopback() || v6.is_unspecified() || unique_local || link_local)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locator() -> HttpGeoLocator {
        HttpGeoLocator::new(&GeolocationConfig {
            enabled: true,
            endpoint: "http://127.0.0.1:9/json/{ip}".to_string(),
            timeout_ms: 200,
        })
        .expect("client")
    }

    #[tokio::test]
    async fn test_disabled_locator_resolves_nothing() {
        assert!(DisabledGeoLocator.locate("8.8.8.8").await.is_none());
    }

    #[tokio::test]
    async fn test_private_and_malformed_addresses_skip_lookup() {
        let geo = locator();
        for ip in ["127.0.0.1", "10.1.2.3", "192.168.0.10", "::1", "fd00::1", "nope", "unknown"] {
            assert!(geo.locate(ip).await.is_none(), "{ip} should not resolve");
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_degrades_to_none() {
        assert!(locator().locate("8.8.8.8").await.is_none());
    }

    #[test]
    fn test_url_template() {
        let ip: IpAddr = "8.8.4.4".parse().unwrap();
        assert_eq!(locator().url_for(&ip), "http://127.0.0.1:9/json/8.8.4.4");
    }

    #[test]
    fn test_public_address_classification() {
        let public: IpAddr = "8.8.8.8".parse().unwrap();
        let mapped_private: IpAddr = "::ffff:10.0.0.1".parse().unwrap();
        let global_v6: IpAddr = "2001:4860:4860::8888".parse().unwrap();
        assert!(is_public(&public));
        assert!(!is_public(&mapped_private));
        assert!(is_public(&global_v6));
    }

    #[test]
    fn test_failed_status_yields_none() {
        let response: IpApiResponse =
            serde_json::from_str(r#"{"status":"fail","message":"reserved range"}"#).unwrap();
        assert!(into_location(response).is_none());
    }

    #[test]
    fn test_success_maps_fields() {
        let response: IpApiResponse = serde_json::from_str(
            r#"{"status":"success","countryCode":"US","regionName":"California",
                "city":"Mountain View","timezone":"America/Los_Angeles","lat":37.4,"lon":-122.1}"#,
        )
        .unwrap();
        let location = into_location(response).expect("location");
        assert_eq!(location.country.as_deref(), Some("US"));
        assert_eq!(location.city.as_deref(), Some("Mountain View"));
        assert_eq!(location.longitude, Some(-122.1));
    }
}
