// geocode/nominatim.rs
use super::Geocoder;
use crate::api::ApiError;
use crate::domain::listing::Coordinates;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = "MinskJobsApp/1.0";

#[derive(Debug, Default, Deserialize)]
pub struct ReverseResponse {
    pub display_name: Option<String>,
    pub address: Option<AddressParts>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddressParts {
    pub road: Option<String>,
    pub house_number: Option<String>,
    pub suburb: Option<String>,
    pub neighbourhood: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

impl ReverseResponse {
    /// Street, house, district, city. Falls back to the first three parts
    /// of `display_name`. Nothing usable without an `address` block.
    pub fn compose(&self) -> Option<String> {
        let addr = self.address.as_ref()?;
        let mut parts: Vec<&str> = Vec::new();

        if let Some(road) = present(&addr.road) {
            parts.push(road);
        }
        if let Some(house) = present(&addr.house_number) {
            parts.push(house);
        }
        if let Some(district) = present(&addr.suburb).or(present(&addr.neighbourhood)) {
            parts.push(district);
        }
        if let Some(city) = present(&addr.city).or(present(&addr.town)) {
            if !parts.contains(&city) {
                parts.push(city);
            }
        }

        if !parts.is_empty() {
            return Some(parts.join(", "));
        }

        present(&self.display_name).map(|name| {
            name.split(", ").take(3).collect::<Vec<_>>().join(", ")
        })
    }
}

pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
    language: String,
}

impl NominatimGeocoder {
    pub fn new(endpoint: &str, language: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            language: language.to_string(),
        })
    }

    pub fn fetch(&self, at: Coordinates) -> Result<ReverseResponse, ApiError> {
        let lat = at.lat.to_string();
        let lon = at.lng.to_string();
        let params = [
            ("format", "json"),
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
            ("zoom", "18"),
            ("addressdetails", "1"),
            ("accept-language", self.language.as_str()),
        ];

        let resp = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                detail: None,
            });
        }

        resp.json::<ReverseResponse>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl Geocoder for NominatimGeocoder {
    fn reverse(&self, at: Coordinates) -> Option<String> {
        match self.fetch(at) {
            Ok(resp) => {
                let address = resp.compose();
                debug!(lat = at.lat, lng = at.lng, found = address.is_some(), "reverse geocode");
                address
            }
            Err(e) => {
                warn!(lat = at.lat, lng = at.lng, "reverse geocode failed: {e}");
                None
            }
        }
    }
}
