// src/map/mod.rs
//
// Map widget seam. The widget itself (tiles, DOM, event plumbing) lives
// outside the crate; the core only talks to it through `MapSurface`.

mod layer;
mod reconciler;

pub use layer::MarkerLayer;
pub use reconciler::{reconcile, MarkerReconciler, PlacedMarker};

use crate::domain::listing::{Coordinates, ListingId, ListingKind};
use serde::Serialize;

/// Fixed map center (Minsk).
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 53.9045,
    lng: 27.5615,
};
pub const DEFAULT_ZOOM: u8 = 11;
/// Zoom used when jumping to a single listing or a geolocation fix.
pub const FOCUS_ZOOM: u8 = 15;
pub const MAX_ZOOM: u8 = 19;
pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Opaque id the surface hands out for each marker it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MarkerHandle(pub u64);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub position: Coordinates,
    pub color: &'static str,
    pub draggable: bool,
    /// `None` for the transient placement pin.
    pub listing_id: Option<ListingId>,
    pub popup_html: Option<String>,
}

impl MarkerSpec {
    /// Draggable pin dropped while picking a location.
    pub fn placement(kind: ListingKind, position: Coordinates) -> Self {
        Self {
            position,
            color: kind.marker_color(),
            draggable: true,
            listing_id: None,
            popup_html: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: Coordinates,
    pub zoom: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

pub trait MapSurface {
    fn add_marker(&mut self, spec: MarkerSpec) -> MarkerHandle;

    /// Removing an unknown handle is a no-op.
    fn remove_marker(&mut self, handle: MarkerHandle);

    fn open_popup(&mut self, handle: MarkerHandle);

    fn set_view(&mut self, center: Coordinates, zoom: u8);
}

impl<M: MapSurface + ?Sized> MapSurface for &mut M {
    fn add_marker(&mut self, spec: MarkerSpec) -> MarkerHandle {
        (**self).add_marker(spec)
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        (**self).remove_marker(handle)
    }

    fn open_popup(&mut self, handle: MarkerHandle) {
        (**self).open_popup(handle)
    }

    fn set_view(&mut self, center: Coordinates, zoom: u8) {
        (**self).set_view(center, zoom)
    }
}
