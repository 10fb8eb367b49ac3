// src/domain/listing.rs

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub type ListingId = i64;

/// What a listing offers. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    /// Someone needs a job done.
    Task,
    /// Someone is available for work.
    Worker,
}

impl ListingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Task => "task",
            ListingKind::Worker => "worker",
        }
    }

    /// Pin color on the map. Transient placement pins use the same palette.
    pub fn marker_color(&self) -> &'static str {
        match self {
            ListingKind::Task => "red",
            ListingKind::Worker => "green",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A listing as returned by the listings backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    #[serde(rename = "type")]
    pub kind: ListingKind,
    pub title: String,
    pub description: String,
    pub address: String,
    #[serde(default)]
    pub payment: String,
    pub contacts: String,
    pub latitude: f64,
    pub longitude: f64,

    // Owner display name; only on bulk and single reads.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

impl Listing {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Description cut to `max_chars`, with an ellipsis when something was cut.
    pub fn description_preview(&self, max_chars: usize) -> String {
        let mut chars = self.description.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }

    pub fn contact_link(&self) -> String {
        contact_link(&self.contacts)
    }
}

/// Body of `POST /api/listings`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewListing {
    #[serde(rename = "type")]
    pub kind: ListingKind,
    pub title: String,
    pub description: String,
    pub address: String,
    pub payment: String,
    pub contacts: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Chat link for a contact handle or phone-like token.
///
/// A leading `@` is dropped; anything else is passed through as-is.
pub fn contact_link(contacts: &str) -> String {
    let handle = contacts.trim();
    let handle = handle.strip_prefix('@').unwrap_or(handle);
    format!("https://t.me/{handle}")
}

/// The backend emits Python `isoformat()` strings, with or without an offset.
/// Anything unparseable is dropped rather than failing the whole listing.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}
