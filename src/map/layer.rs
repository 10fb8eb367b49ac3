// src/map/layer.rs

use super::{MapSurface, MarkerHandle, MarkerSpec, Viewport};
use crate::domain::listing::{Coordinates, ListingId};
use serde::Serialize;
use std::collections::BTreeMap;

/// In-memory map surface.
///
/// Keeps what a real widget would show so it can be rendered as JSON for the
/// browser map, or inspected directly.
#[derive(Debug, Default, Serialize)]
pub struct MarkerLayer {
    viewport: Viewport,
    #[serde(serialize_with = "markers_in_order")]
    markers: BTreeMap<MarkerHandle, MarkerSpec>,
    open_popup: Option<MarkerHandle>,
    #[serde(skip)]
    next_handle: u64,
}

fn markers_in_order<S>(
    markers: &BTreeMap<MarkerHandle, MarkerSpec>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(markers.values())
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, handle: MarkerHandle) -> Option<&MarkerSpec> {
        self.markers.get(&handle)
    }

    pub fn markers(&self) -> impl Iterator<Item = (&MarkerHandle, &MarkerSpec)> {
        self.markers.iter()
    }

    /// Markers bound to listings, skipping the placement pin.
    pub fn listing_ids(&self) -> Vec<ListingId> {
        self.markers.values().filter_map(|m| m.listing_id).collect()
    }

    /// The transient placement pin, if one is shown.
    pub fn placement_pin(&self) -> Option<&MarkerSpec> {
        self.markers.values().find(|m| m.listing_id.is_none())
    }

    pub fn open_popup_handle(&self) -> Option<MarkerHandle> {
        self.open_popup
    }

    /// Moves a marker as the widget would at the end of a drag.
    pub fn drag(&mut self, handle: MarkerHandle, to: Coordinates) -> bool {
        match self.markers.get_mut(&handle) {
            Some(spec) if spec.draggable => {
                spec.position = to;
                true
            }
            _ => false,
        }
    }
}

impl MapSurface for MarkerLayer {
    fn add_marker(&mut self, spec: MarkerSpec) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle(self.next_handle);
        self.markers.insert(handle, spec);
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.remove(&handle);
        if self.open_popup == Some(handle) {
            self.open_popup = None;
        }
    }

    fn open_popup(&mut self, handle: MarkerHandle) {
        if self.markers.contains_key(&handle) {
            self.open_popup = Some(handle);
        }
    }

    fn set_view(&mut self, center: Coordinates, zoom: u8) {
        self.viewport = Viewport { center, zoom };
    }
}
