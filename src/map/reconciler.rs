// src/map/reconciler.rs

use super::{MapSurface, MarkerHandle, MarkerSpec};
use crate::domain::listing::{Listing, ListingId};
use crate::templates::components::listing_popup;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedMarker {
    pub listing_id: ListingId,
    pub handle: MarkerHandle,
}

fn listing_marker(listing: &Listing) -> MarkerSpec {
    MarkerSpec {
        position: listing.coordinates(),
        color: listing.kind.marker_color(),
        draggable: false,
        listing_id: Some(listing.id),
        popup_html: Some(listing_popup(listing).into_string()),
    }
}

/// Clear-and-rebuild: every previous marker goes, one new marker per listing.
///
/// Open popups do not survive this.
pub fn reconcile<M: MapSurface + ?Sized>(
    surface: &mut M,
    previous: Vec<PlacedMarker>,
    listings: &[Listing],
) -> Vec<PlacedMarker> {
    for marker in previous {
        surface.remove_marker(marker.handle);
    }

    listings
        .iter()
        .map(|listing| PlacedMarker {
            listing_id: listing.id,
            handle: surface.add_marker(listing_marker(listing)),
        })
        .collect()
}

/// Owns the current marker set and an id index over it.
#[derive(Debug, Default)]
pub struct MarkerReconciler {
    placed: Vec<PlacedMarker>,
    by_listing: HashMap<ListingId, MarkerHandle>,
}

impl MarkerReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync<M: MapSurface + ?Sized>(&mut self, surface: &mut M, listings: &[Listing]) {
        let previous = std::mem::take(&mut self.placed);
        let removed = previous.len();
        self.placed = reconcile(surface, previous, listings);
        self.by_listing = self
            .placed
            .iter()
            .map(|m| (m.listing_id, m.handle))
            .collect();
        debug!(removed, added = self.placed.len(), "markers reconciled");
    }

    pub fn marker_for(&self, id: ListingId) -> Option<MarkerHandle> {
        self.by_listing.get(&id).copied()
    }

    pub fn placed(&self) -> &[PlacedMarker] {
        &self.placed
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::ListingKind;
    use crate::map::MarkerLayer;
    use std::collections::HashSet;

    fn listing(id: i64, kind: ListingKind) -> Listing {
        Listing {
            id,
            kind,
            title: format!("Объявление {id}"),
            description: String::new(),
            address: "ул. Ленина".into(),
            payment: "10 BYN".into(),
            contacts: "@c".into(),
            latitude: 53.9 + id as f64 / 100.0,
            longitude: 27.5,
            username: None,
            created_at: None,
        }
    }

    #[test]
    fn one_marker_per_listing_tagged_by_id() {
        let mut layer = MarkerLayer::new();
        let listings = vec![
            listing(1, ListingKind::Task),
            listing(2, ListingKind::Worker),
            listing(3, ListingKind::Task),
        ];

        let placed = reconcile(&mut layer, Vec::new(), &listings);

        assert_eq!(placed.len(), 3);
        assert_eq!(layer.len(), 3);
        let ids: HashSet<_> = layer.listing_ids().into_iter().collect();
        assert_eq!(ids, HashSet::from([1, 2, 3]));

        let worker = layer.get(placed[1].handle).unwrap();
        assert_eq!(worker.color, "green");
        assert!(!worker.draggable);
        assert!(worker
            .popup_html
            .as_deref()
            .unwrap()
            .contains("Объявление 2"));
    }

    #[test]
    fn refresh_drops_stale_markers() {
        let mut layer = MarkerLayer::new();
        let first = reconcile(
            &mut layer,
            Vec::new(),
            &[listing(1, ListingKind::Task), listing(2, ListingKind::Task)],
        );
        let second = reconcile(&mut layer, first.clone(), &[listing(3, ListingKind::Worker)]);

        assert_eq!(layer.len(), 1);
        assert_eq!(layer.listing_ids(), vec![3]);
        assert!(first.iter().all(|m| layer.get(m.handle).is_none()));
        assert_eq!(second[0].listing_id, 3);
    }

    #[test]
    fn reconcile_leaves_foreign_markers_alone() {
        let mut layer = MarkerLayer::new();
        let pin = layer.add_marker(MarkerSpec::placement(
            ListingKind::Task,
            crate::domain::Coordinates::new(53.0, 27.0),
        ));
        reconcile(&mut layer, Vec::new(), &[listing(1, ListingKind::Task)]);
        assert!(layer.get(pin).is_some());
        assert_eq!(layer.len(), 2);
    }

    #[test]
    fn lookup_follows_latest_sync() {
        let mut layer = MarkerLayer::new();
        let mut reconciler = MarkerReconciler::new();

        reconciler.sync(&mut layer, &[listing(1, ListingKind::Task)]);
        let old = reconciler.marker_for(1).unwrap();

        reconciler.sync(&mut layer, &[listing(1, ListingKind::Task), listing(2, ListingKind::Worker)]);
        let new = reconciler.marker_for(1).unwrap();

        assert_ne!(old, new);
        assert!(layer.get(old).is_none());
        assert!(reconciler.marker_for(2).is_some());
        assert!(reconciler.marker_for(9).is_none());
        assert_eq!(reconciler.len(), 2);
    }
}
