// src/app.rs
//
// The board controller. One explicit state struct owns everything the page
// needs; UI and map events come in as method calls.

use crate::api::{AuthUser, CreatedListing, ListingsApi};
use crate::deeplink::{strip_deep_link, DeepLink};
use crate::domain::filter::{Category, FilterCriteria, FilterInput};
use crate::domain::listing::{Coordinates, Listing, ListingId, ListingKind};
use crate::errors::{AppError, SubmitError};
use crate::geocode::{fallback_address, Geocoder};
use crate::map::{MapSurface, MarkerReconciler, FOCUS_ZOOM};
use crate::placement::{
    AddressLookup, GeolocationError, GeolocationOptions, ListingForm, PlacementSession,
    PlacementState, GEOLOCATION_OPTIONS,
};
use crate::store::{split_by_kind, ListingStore};
use tracing::{debug, error, info, warn};
use url::Url;

pub const DEFAULT_CITY: &str = "Минск";

/// Who is using the board.
#[derive(Debug, Clone, PartialEq)]
pub enum Identity {
    /// Opened outside Telegram.
    Local,
    /// Opened inside Telegram. `user` is `None` when the backend refused the
    /// init data; the page keeps working anonymously.
    Telegram {
        init_data: String,
        user: Option<AuthUser>,
    },
}

impl Identity {
    pub fn init_data(&self) -> Option<&str> {
        match self {
            Identity::Local => None,
            Identity::Telegram { init_data, .. } => Some(init_data),
        }
    }

    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            Identity::Local => None,
            Identity::Telegram { user, .. } => user.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    TaskForm,
    WorkerForm,
    Board,
    MyListings,
    Detail,
}

impl Modal {
    pub fn is_placement(&self) -> bool {
        matches!(self, Modal::TaskForm | Modal::WorkerForm)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BoardView {
    pub open: bool,
    pub category: Category,
    pub input: FilterInput,
}

#[derive(Debug, Clone, Default)]
pub struct MyListingsView {
    pub open: bool,
    pub tab: Category,
    pub tasks: Vec<Listing>,
    pub workers: Vec<Listing>,
}

impl MyListingsView {
    pub fn visible(&self) -> &[Listing] {
        match self.tab {
            Category::Tasks => &self.tasks,
            Category::Workers => &self.workers,
        }
    }
}

pub fn published_message(kind: ListingKind) -> &'static str {
    match kind {
        ListingKind::Task => "Задача опубликована!",
        ListingKind::Worker => "Объявление опубликовано!",
    }
}

pub struct App<A, M> {
    api: A,
    map: M,
    geocoder: Option<Box<dyn Geocoder>>,
    city: String,
    identity: Identity,
    store: ListingStore,
    markers: MarkerReconciler,
    session: PlacementSession,
    board: BoardView,
    my_listings: MyListingsView,
    detail: Option<Listing>,
}

impl<A: ListingsApi, M: MapSurface> App<A, M> {
    pub fn new(api: A, mut map: M) -> Self {
        let view = crate::map::Viewport::default();
        map.set_view(view.center, view.zoom);

        Self {
            api,
            map,
            geocoder: None,
            city: DEFAULT_CITY.to_string(),
            identity: Identity::Local,
            store: ListingStore::new(),
            markers: MarkerReconciler::new(),
            session: PlacementSession::new(),
            board: BoardView::default(),
            my_listings: MyListingsView::default(),
            detail: None,
        }
    }

    pub fn with_geocoder(mut self, geocoder: Box<dyn Geocoder>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    /// Use a known identity without an auth round-trip.
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    // ----- accessors -----

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn store(&self) -> &ListingStore {
        &self.store
    }

    pub fn markers(&self) -> &MarkerReconciler {
        &self.markers
    }

    pub fn session(&self) -> &PlacementSession {
        &self.session
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn board(&self) -> &BoardView {
        &self.board
    }

    pub fn board_listings(&self) -> &[Listing] {
        self.store.filtered()
    }

    pub fn my_listings(&self) -> &MyListingsView {
        &self.my_listings
    }

    pub fn detail(&self) -> Option<&Listing> {
        self.detail.as_ref()
    }

    /// Hint line shown over the map while placing.
    pub fn hint(&self) -> Option<&'static str> {
        match self.session.state() {
            PlacementState::Armed {
                kind: ListingKind::Task,
            }
            | PlacementState::Reselecting {
                kind: ListingKind::Task,
                ..
            } => Some("Нажмите на карте, где будет работа"),
            PlacementState::Armed {
                kind: ListingKind::Worker,
            }
            | PlacementState::Reselecting {
                kind: ListingKind::Worker,
                ..
            } => Some("Нажмите на карте, где вам удобно работать"),
            PlacementState::PinPlaced { .. } if self.geocoder.is_some() => {
                Some("Получение адреса...")
            }
            _ => None,
        }
    }

    // ----- startup & refresh -----

    /// Authenticate (never fatal) and pull the first listing snapshot.
    pub fn start(&mut self, init_data: Option<String>) {
        self.identity = match init_data.filter(|d| !d.is_empty()) {
            None => {
                info!("no telegram init data, running in local mode");
                Identity::Local
            }
            Some(init_data) => {
                let user = match self.api.authenticate(&init_data) {
                    Ok(user) => Some(user),
                    Err(e) => {
                        warn!("telegram auth failed, continuing anonymously: {e}");
                        None
                    }
                };
                Identity::Telegram { init_data, user }
            }
        };

        // Failure is logged inside; the page starts empty.
        let _ = self.refresh_listings();
    }

    /// Pull all listings and rebuild the markers. On failure the previous
    /// snapshot and markers stay.
    pub fn refresh_listings(&mut self) -> Result<usize, AppError> {
        let listings = self.api.list_listings().map_err(|e| {
            error!("loading listings failed: {e}");
            AppError::from(e)
        })?;

        self.store.replace(listings);
        self.markers.sync(&mut self.map, self.store.snapshot());
        debug!(count = self.store.len(), "listing snapshot replaced");
        Ok(self.store.len())
    }

    // ----- placement -----

    pub fn arm(&mut self, kind: ListingKind) {
        self.session.arm(&mut self.map, kind);
    }

    /// Map click. Returns a lookup to resolve when a geocoder is configured;
    /// without one the form opens straight away.
    pub fn on_map_click(&mut self, at: Coordinates) -> Option<AddressLookup> {
        let lookup = self.session.click(&mut self.map, at)?;
        self.after_pin_moved(lookup, None)
    }

    pub fn on_marker_drag_end(&mut self, to: Coordinates) -> Option<AddressLookup> {
        let typed = self.session.address().map(str::to_owned);
        let lookup = self.session.drag_end(to)?;
        self.after_pin_moved(lookup, typed)
    }

    pub fn geolocation_options(&self) -> GeolocationOptions {
        GEOLOCATION_OPTIONS
    }

    /// A position fix for the `kind` form: same as a click there, and the
    /// map jumps to it.
    pub fn on_geolocation_fix(&mut self, kind: ListingKind, at: Coordinates) -> Option<AddressLookup> {
        let lookup = self.session.drop_pin(&mut self.map, kind, at);
        self.map.set_view(at, FOCUS_ZOOM);
        self.after_pin_moved(lookup, None)
    }

    /// The session is left exactly as it was before the request.
    pub fn on_geolocation_error(&self, err: GeolocationError) -> &'static str {
        warn!("geolocation failed: {err}");
        err.user_message()
    }

    fn after_pin_moved(
        &mut self,
        lookup: AddressLookup,
        keep_address: Option<String>,
    ) -> Option<AddressLookup> {
        if self.geocoder.is_some() {
            return Some(lookup);
        }
        self.session.open_form(keep_address);
        None
    }

    /// Run the configured geocoder for `lookup` and apply the answer.
    pub fn resolve_address(&mut self, lookup: AddressLookup) -> bool {
        let address = self
            .geocoder
            .as_ref()
            .and_then(|g| g.reverse(lookup.at));
        self.on_address_resolved(lookup, address)
    }

    /// Apply a geocoder answer. `None` becomes the coordinate-text fallback.
    pub fn on_address_resolved(&mut self, lookup: AddressLookup, address: Option<String>) -> bool {
        let address = address
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| fallback_address(&self.city, lookup.at));
        self.session.address_resolved(lookup, address)
    }

    pub fn choose_on_map(&mut self) -> bool {
        self.session.choose_on_map()
    }

    /// Publish the listing being placed.
    ///
    /// Without a pin nothing is sent. Any failure leaves the session, pin and
    /// form untouched so the user can retry.
    pub fn submit(&mut self, form: &ListingForm) -> Result<CreatedListing, SubmitError> {
        let Some((kind, at)) = self.session.submission() else {
            warn!("submit without coordinates");
            return Err(SubmitError::MissingCoordinates);
        };

        let body = form.to_new_listing(kind, at, self.session.address())?;

        let created = self
            .api
            .create_listing(&body, self.identity.init_data())
            .map_err(|e| {
                warn!("publishing listing failed: {e}");
                SubmitError::from(e)
            })?;

        self.session.reset(&mut self.map);
        let _ = self.refresh_listings();
        Ok(created)
    }

    pub fn cancel(&mut self) {
        self.session.reset(&mut self.map);
    }

    /// Only the placement forms share state with the session; closing the
    /// board, my listings or a detail view never resets it.
    pub fn close_modal(&mut self, modal: Modal) {
        if modal.is_placement() {
            self.session.reset(&mut self.map);
            return;
        }
        match modal {
            Modal::TaskForm | Modal::WorkerForm => {}
            Modal::Board => self.board.open = false,
            Modal::MyListings => self.my_listings.open = false,
            Modal::Detail => self.detail = None,
        }
    }

    // ----- board -----

    pub fn show_board(&mut self) -> Result<&[Listing], AppError> {
        self.refresh_listings()?;
        self.board.open = true;
        self.reapply_filters();
        Ok(self.store.filtered())
    }

    pub fn switch_board_tab(&mut self, category: Category) -> &[Listing] {
        self.board.category = category;
        self.reapply_filters();
        self.store.filtered()
    }

    pub fn apply_filters(&mut self, input: FilterInput) -> &[Listing] {
        self.board.input = input;
        self.reapply_filters();
        self.store.filtered()
    }

    fn reapply_filters(&mut self) {
        let criteria = FilterCriteria::from_input(self.board.category, &self.board.input);
        let shown = self.store.apply(criteria).len();
        debug!(category = self.board.category.as_str(), shown, "filters applied");
    }

    // ----- my listings -----

    fn require_telegram(&self) -> Result<String, AppError> {
        self.identity
            .init_data()
            .map(str::to_owned)
            .ok_or(AppError::TelegramOnly)
    }

    fn reload_my_listings(&mut self) -> Result<(), AppError> {
        let init_data = self.require_telegram()?;
        let mine = self.api.my_listings(Some(&init_data)).map_err(|e| {
            error!("loading own listings failed: {e}");
            AppError::from(e)
        })?;
        let (tasks, workers) = split_by_kind(&mine);
        self.my_listings.tasks = tasks;
        self.my_listings.workers = workers;
        Ok(())
    }

    pub fn show_my_listings(&mut self) -> Result<&[Listing], AppError> {
        self.reload_my_listings()?;
        self.my_listings.open = true;
        Ok(self.my_listings.visible())
    }

    /// Tab switch refetches; on failure the previous lists stay.
    pub fn switch_my_listings_tab(&mut self, tab: Category) -> Result<&[Listing], AppError> {
        self.my_listings.tab = tab;
        self.reload_my_listings()?;
        Ok(self.my_listings.visible())
    }

    pub fn remove_listing(&mut self, id: ListingId) -> Result<(), AppError> {
        let init_data = self.require_telegram()?;
        self.api.delete_listing(id, Some(&init_data)).map_err(|e| {
            warn!(id, "removing listing failed: {e}");
            AppError::from(e)
        })?;

        info!(id, "listing removed");
        let _ = self.refresh_listings();
        if let Err(e) = self.reload_my_listings() {
            warn!("refreshing own listings after removal failed: {e}");
        }
        Ok(())
    }

    // ----- detail & deep links -----

    pub fn show_listing_detail(&mut self, id: ListingId) -> Result<&Listing, AppError> {
        let listing = self.api.get_listing(id).map_err(|e| {
            error!(id, "loading listing failed: {e}");
            AppError::from(e)
        })?;
        self.map.set_view(listing.coordinates(), FOCUS_ZOOM);
        Ok(self.detail.insert(listing))
    }

    /// Center on the linked listing and open its popup. Returns the URL with
    /// the link parameters removed, or `None` if `url` carries no link.
    pub fn open_deep_link(&mut self, url: &Url) -> Option<Url> {
        let link = DeepLink::from_url(url)?;
        self.map.set_view(link.at, FOCUS_ZOOM);

        match self.markers.marker_for(link.listing_id) {
            Some(handle) => self.map.open_popup(handle),
            None => debug!(id = link.listing_id, "deep-linked listing has no marker"),
        }

        Some(strip_deep_link(url))
    }
}
