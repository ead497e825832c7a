//! Reverse geocoding client.
//!
//! The client is built once and shared by reference across requests.
//! Every failure path degrades to a [`GeocodeOutcome`] instead of an
//! error, and [`resolve_name`] turns any non-resolved outcome into the
//! coordinate fallback string.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use super::convert::GeoCoordinate;
use crate::config::GeocoderConfig;
use crate::constants::geocoder::FALLBACK_PRECISION;
use crate::error::{Error, Result};

/// Outcome of a reverse geocoding request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodeOutcome {
    /// The service returned a non-empty address.
    Resolved(String),
    /// The service answered but had no address for the coordinate.
    Empty,
    /// The request failed (network, timeout, HTTP status, bad payload).
    Failed(String),
}

/// A service that turns coordinates into place names.
///
/// Implementations must be safe to share between concurrent requests.
pub trait ReverseGeocoder: Send + Sync {
    /// Look up the address for a coordinate.
    fn reverse(&self, coordinate: GeoCoordinate) -> impl Future<Output = GeocodeOutcome> + Send;
}

/// Nominatim-compatible reverse geocoding client.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    endpoint: Url,
    language: Option<String>,
}

/// Subset of the Nominatim `jsonv2` response.
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
    error: Option<String>,
}

impl NominatimClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL or the HTTP
    /// client cannot be constructed.
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| Error::ConfigValidation {
            message: format!("invalid geocoder endpoint '{}': {e}", config.endpoint),
        })?;

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|source| Error::HttpClient { source })?;

        Ok(Self {
            client,
            endpoint,
            language: config.language.clone(),
        })
    }

    /// Full request URL for a coordinate.
    pub fn request_url(&self, coordinate: GeoCoordinate) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("format", "jsonv2")
                .append_pair("lat", &coordinate.latitude.to_string())
                .append_pair("lon", &coordinate.longitude.to_string());
            if let Some(language) = &self.language {
                query.append_pair("accept-language", language);
            }
        }
        url
    }
}

impl ReverseGeocoder for NominatimClient {
    async fn reverse(&self, coordinate: GeoCoordinate) -> GeocodeOutcome {
        let url = self.request_url(coordinate);
        debug!("Reverse geocoding via {url}");

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return GeocodeOutcome::Failed("request timed out".into()),
            Err(e) => return GeocodeOutcome::Failed(e.to_string()),
        };

        let status = response.status();
        if !status.is_success() {
            return GeocodeOutcome::Failed(format!("HTTP {status}"));
        }

        match response.bytes().await {
            Ok(body) => parse_response(&body),
            Err(e) => GeocodeOutcome::Failed(e.to_string()),
        }
    }
}

/// Interpret a reverse geocoding response body.
fn parse_response(body: &[u8]) -> GeocodeOutcome {
    let parsed: ReverseResponse = match serde_json::from_slice(body) {
        Ok(parsed) => parsed,
        Err(e) => return GeocodeOutcome::Failed(format!("invalid response: {e}")),
    };

    match parsed.display_name.map(|name| name.trim().to_string()) {
        Some(name) if !name.is_empty() => GeocodeOutcome::Resolved(name),
        _ => {
            if let Some(error) = parsed.error {
                debug!("Geocoding service reported: {error}");
            }
            GeocodeOutcome::Empty
        }
    }
}

/// Geocoder used when lookups are turned off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGeocoder;

impl ReverseGeocoder for DisabledGeocoder {
    async fn reverse(&self, _coordinate: GeoCoordinate) -> GeocodeOutcome {
        GeocodeOutcome::Failed("disabled".to_string())
    }
}

/// Geocoder selected at runtime from configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredGeocoder {
    /// Online lookups.
    Nominatim(NominatimClient),
    /// Offline; always falls back to the coordinate string.
    Disabled(DisabledGeocoder),
}

impl ConfiguredGeocoder {
    /// Pick the geocoder for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an online client is requested but cannot be built.
    pub fn from_config(config: &GeocoderConfig, offline: bool) -> Result<Self> {
        if offline || !config.enabled {
            debug!("Reverse geocoding disabled");
            return Ok(Self::Disabled(DisabledGeocoder));
        }
        NominatimClient::new(config).map(Self::Nominatim)
    }
}

impl ReverseGeocoder for ConfiguredGeocoder {
    async fn reverse(&self, coordinate: GeoCoordinate) -> GeocodeOutcome {
        match self {
            Self::Nominatim(client) => client.reverse(coordinate).await,
            Self::Disabled(disabled) => disabled.reverse(coordinate).await,
        }
    }
}

/// Deterministic name for a coordinate the service could not resolve.
pub fn fallback_name(coordinate: GeoCoordinate) -> String {
    format!(
        "Location: {:.prec$}, {:.prec$}",
        coordinate.latitude,
        coordinate.longitude,
        prec = FALLBACK_PRECISION
    )
}

/// Resolve a coordinate to a place name, never failing.
pub async fn resolve_name<G: ReverseGeocoder>(geocoder: &G, coordinate: GeoCoordinate) -> String {
    match geocoder.reverse(coordinate).await {
        GeocodeOutcome::Resolved(name) => name,
        GeocodeOutcome::Empty => {
            debug!("No address for {coordinate:?}, using fallback name");
            fallback_name(coordinate)
        }
        GeocodeOutcome::Failed(reason) => {
            warn!("Reverse geocoding failed: {reason}");
            fallback_name(coordinate)
        }
    }
}
