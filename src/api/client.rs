// api/client.rs
use super::models::{error_detail, AuthUser, CreatedListing};
use super::ApiError;
use crate::domain::listing::{Listing, ListingId, NewListing};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Header carrying the raw Telegram mini-app init data.
pub const INIT_DATA_HEADER: &str = "X-Telegram-Init-Data";

/// The remote listings backend.
pub trait ListingsApi {
    fn authenticate(&self, init_data: &str) -> Result<AuthUser, ApiError>;

    fn list_listings(&self) -> Result<Vec<Listing>, ApiError>;

    fn get_listing(&self, id: ListingId) -> Result<Listing, ApiError>;

    fn my_listings(&self, init_data: Option<&str>) -> Result<Vec<Listing>, ApiError>;

    fn create_listing(
        &self,
        listing: &NewListing,
        init_data: Option<&str>,
    ) -> Result<CreatedListing, ApiError>;

    fn delete_listing(&self, id: ListingId, init_data: Option<&str>) -> Result<(), ApiError>;
}

impl<T: ListingsApi + ?Sized> ListingsApi for &T {
    fn authenticate(&self, init_data: &str) -> Result<AuthUser, ApiError> {
        (**self).authenticate(init_data)
    }

    fn list_listings(&self) -> Result<Vec<Listing>, ApiError> {
        (**self).list_listings()
    }

    fn get_listing(&self, id: ListingId) -> Result<Listing, ApiError> {
        (**self).get_listing(id)
    }

    fn my_listings(&self, init_data: Option<&str>) -> Result<Vec<Listing>, ApiError> {
        (**self).my_listings(init_data)
    }

    fn create_listing(
        &self,
        listing: &NewListing,
        init_data: Option<&str>,
    ) -> Result<CreatedListing, ApiError> {
        (**self).create_listing(listing, init_data)
    }

    fn delete_listing(&self, id: ListingId, init_data: Option<&str>) -> Result<(), ApiError> {
        (**self).delete_listing(id, init_data)
    }
}

/// reqwest-backed client for the listings backend.
pub struct HttpListingsApi {
    client: Client,
    base: Url,
}

impl HttpListingsApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| ApiError::Config(format!("bad base url {base_url:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::Config(format!("bad base url {base_url:?}")));
        }
        // Paths are joined relative to the base, so it must end in a slash
        // or its last segment would be replaced.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { client, base })
    }

    /// `path` is resolved under the base path, leading slash or not.
    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Config(format!("bad path {path:?}: {e}")))
    }

    fn with_identity(req: RequestBuilder, init_data: Option<&str>) -> RequestBuilder {
        match init_data {
            Some(data) if !data.is_empty() => req.header(INIT_DATA_HEADER, data),
            _ => req,
        }
    }

    fn send(req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req.send().map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().unwrap_or_default();
        let detail = error_detail(&body);
        warn!(status = status.as_u16(), detail = ?detail, "listings backend rejected request");
        Err(ApiError::Http {
            status: status.as_u16(),
            detail,
        })
    }

    fn json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, ApiError> {
        Self::send(req)?
            .json::<T>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl ListingsApi for HttpListingsApi {
    fn authenticate(&self, init_data: &str) -> Result<AuthUser, ApiError> {
        let req = self
            .client
            .post(self.url("/api/auth/telegram")?)
            .header(INIT_DATA_HEADER, init_data);
        let user: AuthUser = Self::json(req)?;
        info!(user_id = user.user_id, "authenticated via telegram");
        Ok(user)
    }

    fn list_listings(&self) -> Result<Vec<Listing>, ApiError> {
        let listings: Vec<Listing> = Self::json(self.client.get(self.url("/api/listings")?))?;
        debug!(count = listings.len(), "fetched listings");
        Ok(listings)
    }

    fn get_listing(&self, id: ListingId) -> Result<Listing, ApiError> {
        Self::json(self.client.get(self.url(&format!("/api/listings/{id}"))?))
    }

    fn my_listings(&self, init_data: Option<&str>) -> Result<Vec<Listing>, ApiError> {
        let req = self.client.get(self.url("/api/listings/my")?);
        Self::json(Self::with_identity(req, init_data))
    }

    fn create_listing(
        &self,
        listing: &NewListing,
        init_data: Option<&str>,
    ) -> Result<CreatedListing, ApiError> {
        let req = self.client.post(self.url("/api/listings")?).json(listing);
        let created: CreatedListing = Self::json(Self::with_identity(req, init_data))?;
        info!(id = created.id, kind = %created.kind, "listing created");
        Ok(created)
    }

    fn delete_listing(&self, id: ListingId, init_data: Option<&str>) -> Result<(), ApiError> {
        let req = self.client.delete(self.url(&format!("/api/listings/{id}"))?);
        Self::send(Self::with_identity(req, init_data))?;
        info!(id, "listing closed");
        Ok(())
    }
}
