// src/tests/utils.rs
//
// In-memory stand-ins for the listings backend and the geocoder.

use crate::api::{ApiError, AuthUser, CreatedListing, ListingsApi};
use crate::domain::listing::{Coordinates, Listing, ListingId, ListingKind, NewListing};
use crate::geocode::Geocoder;
use std::collections::HashMap;
use std::sync::Mutex;

/// Init data the fake backend accepts.
pub const GOOD_INIT_DATA: &str = "query_id=1&user=%7B%22id%22%3A100%7D&hash=ok";
pub const OWNER: &str = "owner";

pub fn listing(id: ListingId, kind: ListingKind, title: &str, payment: &str, at: (f64, f64)) -> Listing {
    Listing {
        id,
        kind,
        title: title.to_string(),
        description: format!("{title}, подробности"),
        address: "Минск".to_string(),
        payment: payment.to_string(),
        contacts: "@someone".to_string(),
        latitude: at.0,
        longitude: at.1,
        username: Some("someone".to_string()),
        created_at: None,
    }
}

/// A small board: two tasks and one worker. Listing 3 belongs to [`OWNER`].
pub fn sample_listings() -> Vec<Listing> {
    let mut own = listing(3, ListingKind::Task, "Собрать шкаф", "Договорная", (53.93, 27.60));
    own.username = Some(OWNER.to_string());

    vec![
        listing(1, ListingKind::Task, "Покрасить забор", "100 BYN", (53.90, 27.56)),
        listing(2, ListingKind::Worker, "Электрик", "от 30 BYN/час", (53.88, 27.50)),
        own,
    ]
}

pub struct FakeApi {
    listings: Mutex<Vec<Listing>>,
    failures: Mutex<HashMap<&'static str, ApiError>>,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeApi {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings: Mutex::new(listings),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make every later call to `op` fail with `err`.
    pub fn fail(&self, op: &'static str, err: ApiError) {
        self.failures.lock().unwrap().insert(op, err);
    }

    pub fn recover(&self, op: &'static str) {
        self.failures.lock().unwrap().remove(op);
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == op).count()
    }

    pub fn stored(&self) -> Vec<Listing> {
        self.listings.lock().unwrap().clone()
    }

    fn enter(&self, op: &'static str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(op);
        match self.failures.lock().unwrap().get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn owner(init_data: Option<&str>) -> Result<(), ApiError> {
        match init_data {
            Some(GOOD_INIT_DATA) => Ok(()),
            _ => Err(ApiError::Http {
                status: 401,
                detail: Some("Invalid Telegram data".into()),
            }),
        }
    }
}

impl ListingsApi for FakeApi {
    fn authenticate(&self, init_data: &str) -> Result<AuthUser, ApiError> {
        self.enter("authenticate")?;
        Self::owner(Some(init_data))?;
        Ok(AuthUser {
            user_id: 1,
            telegram_id: 100,
            username: Some(OWNER.into()),
        })
    }

    fn list_listings(&self) -> Result<Vec<Listing>, ApiError> {
        self.enter("list_listings")?;
        Ok(self.stored())
    }

    fn get_listing(&self, id: ListingId) -> Result<Listing, ApiError> {
        self.enter("get_listing")?;
        self.stored()
            .into_iter()
            .find(|l| l.id == id)
            .ok_or(ApiError::Http {
                status: 404,
                detail: Some("Объявление не найдено".into()),
            })
    }

    fn my_listings(&self, init_data: Option<&str>) -> Result<Vec<Listing>, ApiError> {
        self.enter("my_listings")?;
        Self::owner(init_data)?;
        Ok(self
            .stored()
            .into_iter()
            .filter(|l| l.username.as_deref() == Some(OWNER))
            .map(|l| Listing { username: None, ..l })
            .collect())
    }

    fn create_listing(
        &self,
        new: &NewListing,
        _init_data: Option<&str>,
    ) -> Result<CreatedListing, ApiError> {
        self.enter("create_listing")?;
        let mut listings = self.listings.lock().unwrap();
        let id = listings.iter().map(|l| l.id).max().unwrap_or(0) + 1;
        listings.push(Listing {
            id,
            kind: new.kind,
            title: new.title.clone(),
            description: new.description.clone(),
            address: new.address.clone(),
            payment: new.payment.clone(),
            contacts: new.contacts.clone(),
            latitude: new.latitude,
            longitude: new.longitude,
            username: Some(OWNER.into()),
            created_at: None,
        });
        Ok(CreatedListing {
            id,
            kind: new.kind,
            title: new.title.clone(),
            status: Some("active".into()),
        })
    }

    fn delete_listing(&self, id: ListingId, init_data: Option<&str>) -> Result<(), ApiError> {
        self.enter("delete_listing")?;
        Self::owner(init_data)?;
        let mut listings = self.listings.lock().unwrap();
        let before = listings.len();
        listings.retain(|l| l.id != id);
        if listings.len() == before {
            return Err(ApiError::Http {
                status: 404,
                detail: Some("Объявление не найдено".into()),
            });
        }
        Ok(())
    }
}

/// Answers every lookup with the same text, or with nothing.
pub struct FakeGeocoder(pub Option<&'static str>);

impl Geocoder for FakeGeocoder {
    fn reverse(&self, _at: Coordinates) -> Option<String> {
        self.0.map(str::to_owned)
    }
}
