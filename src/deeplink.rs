// src/deeplink.rs
//
// `?show=<id>&lat=<lat>&lng=<lng>` opens the page centered on a listing.

use crate::domain::listing::{Coordinates, ListingId};
use url::Url;

const PARAMS: [&str; 3] = ["show", "lat", "lng"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeepLink {
    pub listing_id: ListingId,
    pub at: Coordinates,
}

impl DeepLink {
    /// All three parameters must be present and parse; otherwise no link.
    pub fn from_url(url: &Url) -> Option<Self> {
        Self::from_pairs(url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())))
    }

    pub fn from_query(query: &str) -> Option<Self> {
        Self::from_pairs(
            url::form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned())),
        )
    }

    fn from_pairs(pairs: impl Iterator<Item = (String, String)>) -> Option<Self> {
        let (mut show, mut lat, mut lng) = (None, None, None);
        for (key, value) in pairs {
            match key.as_str() {
                "show" => show = Some(value),
                "lat" => lat = Some(value),
                "lng" => lng = Some(value),
                _ => {}
            }
        }

        let listing_id = show?.trim().parse::<ListingId>().ok()?;
        let at = Coordinates::new(
            lat?.trim().parse::<f64>().ok()?,
            lng?.trim().parse::<f64>().ok()?,
        );
        at.is_valid().then_some(Self { listing_id, at })
    }
}

/// `url` without the deep-link parameters; other parameters are kept in order.
pub fn strip_deep_link(url: &Url) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !PARAMS.iter().any(|p| *k == *p))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut clean = url.clone();
    if kept.is_empty() {
        clean.set_query(None);
    } else {
        clean.query_pairs_mut().clear().extend_pairs(kept);
    }
    clean
}
