// src/placement/session.rs

use crate::domain::listing::{Coordinates, ListingKind};
use crate::map::{MapSurface, MarkerHandle, MarkerSpec};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum PlacementState {
    Idle,
    /// Waiting for a map click.
    Armed { kind: ListingKind },
    /// Pin dropped, address lookup may be in flight.
    PinPlaced { kind: ListingKind, at: Coordinates },
    FormOpen {
        kind: ListingKind,
        at: Coordinates,
        address: Option<String>,
    },
    /// Form hidden to pick another spot. The pin and its position stay
    /// current until a click replaces them.
    Reselecting {
        kind: ListingKind,
        at: Coordinates,
        address: Option<String>,
    },
}

/// A reverse-geocoding request issued by the session.
///
/// Results are applied in arrival order, so a late answer for an older pin
/// position still overwrites the address.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddressLookup {
    pub seq: u64,
    pub at: Coordinates,
}

/// "Pick a location on the map" mode.
///
/// Owns the transient pin: whenever the state is `Idle` no pin is on the map.
#[derive(Debug)]
pub struct PlacementSession {
    state: PlacementState,
    pin: Option<MarkerHandle>,
    lookups_issued: u64,
}

impl Default for PlacementSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementSession {
    pub fn new() -> Self {
        Self {
            state: PlacementState::Idle,
            pin: None,
            lookups_issued: 0,
        }
    }

    pub fn state(&self) -> &PlacementState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == PlacementState::Idle
    }

    pub fn kind(&self) -> Option<ListingKind> {
        match &self.state {
            PlacementState::Idle => None,
            PlacementState::Armed { kind }
            | PlacementState::PinPlaced { kind, .. }
            | PlacementState::FormOpen { kind, .. }
            | PlacementState::Reselecting { kind, .. } => Some(*kind),
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.submission().map(|(_, at)| at)
    }

    pub fn address(&self) -> Option<&str> {
        match &self.state {
            PlacementState::FormOpen { address, .. }
            | PlacementState::Reselecting { address, .. } => address.as_deref(),
            _ => None,
        }
    }

    pub fn pin(&self) -> Option<MarkerHandle> {
        self.pin
    }

    /// Start (or restart) placing a listing of `kind`.
    pub fn arm<M: MapSurface + ?Sized>(&mut self, surface: &mut M, kind: ListingKind) {
        self.clear_pin(surface);
        debug!(%kind, "placement armed");
        self.state = PlacementState::Armed { kind };
    }

    /// Map click. Ignored unless a kind is selected.
    pub fn click<M: MapSurface + ?Sized>(
        &mut self,
        surface: &mut M,
        at: Coordinates,
    ) -> Option<AddressLookup> {
        let kind = self.kind()?;
        Some(self.drop_pin(surface, kind, at))
    }

    /// Drop the pin for `kind` at `at` regardless of the current state.
    /// Used for geolocation fixes, which carry their own kind.
    pub fn drop_pin<M: MapSurface + ?Sized>(
        &mut self,
        surface: &mut M,
        kind: ListingKind,
        at: Coordinates,
    ) -> AddressLookup {
        self.clear_pin(surface);
        self.pin = Some(surface.add_marker(MarkerSpec::placement(kind, at)));
        self.state = PlacementState::PinPlaced { kind, at };
        debug!(%kind, lat = at.lat, lng = at.lng, "placement pin dropped");
        self.issue_lookup(at)
    }

    /// End of a drag on the transient pin. The widget has already moved it.
    pub fn drag_end(&mut self, to: Coordinates) -> Option<AddressLookup> {
        let (kind, _) = self.submission()?;
        self.state = PlacementState::PinPlaced { kind, at: to };
        Some(self.issue_lookup(to))
    }

    /// Apply an address answer. Only meaningful while a pin is down.
    /// While reselecting the address is stored but the form stays hidden.
    pub fn address_resolved(&mut self, lookup: AddressLookup, address: String) -> bool {
        let Some((kind, at)) = self.submission() else {
            debug!(seq = lookup.seq, "address arrived with no pin down, dropped");
            return false;
        };

        if lookup.seq < self.lookups_issued {
            debug!(seq = lookup.seq, latest = self.lookups_issued, "late address applied");
        }

        let address = Some(address);
        self.state = match self.state {
            PlacementState::Reselecting { .. } => PlacementState::Reselecting { kind, at, address },
            _ => PlacementState::FormOpen { kind, at, address },
        };
        true
    }

    /// Show the form without an address (no geocoder configured), or keep
    /// the one the user already has.
    pub fn open_form(&mut self, address: Option<String>) -> bool {
        match &self.state {
            PlacementState::PinPlaced { kind, at } => {
                self.state = PlacementState::FormOpen {
                    kind: *kind,
                    at: *at,
                    address,
                };
                true
            }
            PlacementState::Reselecting { kind, at, address: kept } => {
                self.state = PlacementState::FormOpen {
                    kind: *kind,
                    at: *at,
                    address: address.or_else(|| kept.clone()),
                };
                true
            }
            PlacementState::FormOpen { .. } => true,
            _ => false,
        }
    }

    /// "Choose on map" from a placed pin or open form. The pin, its
    /// position and the address stay until a click replaces them, and
    /// dragging the pin keeps working.
    pub fn choose_on_map(&mut self) -> bool {
        let Some((kind, at)) = self.submission() else {
            return false;
        };
        if matches!(self.state, PlacementState::Reselecting { .. }) {
            return false;
        }
        let address = self.address().map(str::to_owned);
        self.state = PlacementState::Reselecting { kind, at, address };
        true
    }

    /// Kind and position to submit. `None` means no network call may be made.
    pub fn submission(&self) -> Option<(ListingKind, Coordinates)> {
        match &self.state {
            PlacementState::PinPlaced { kind, at }
            | PlacementState::FormOpen { kind, at, .. }
            | PlacementState::Reselecting { kind, at, .. } => Some((*kind, *at)),
            _ => None,
        }
    }

    /// Drop everything and go back to `Idle`.
    pub fn reset<M: MapSurface + ?Sized>(&mut self, surface: &mut M) {
        self.clear_pin(surface);
        if !self.is_idle() {
            debug!("placement reset");
        }
        self.state = PlacementState::Idle;
    }

    fn clear_pin<M: MapSurface + ?Sized>(&mut self, surface: &mut M) {
        if let Some(pin) = self.pin.take() {
            surface.remove_marker(pin);
        }
    }

    fn issue_lookup(&mut self, at: Coordinates) -> AddressLookup {
        self.lookups_issued += 1;
        AddressLookup {
            seq: self.lookups_issued,
            at,
        }
    }
}
