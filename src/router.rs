use crate::api::{ListingsApi, INIT_DATA_HEADER};
use crate::app::{App, Identity};
use crate::domain::filter::{Category, FilterInput};
use crate::domain::listing::{Coordinates, ListingId, ListingKind};
use crate::domain::payment::PaymentTerms;
use crate::errors::ServerError;
use crate::geocode::{fallback_address, Geocoder};
use crate::map::MarkerLayer;
use crate::placement::ListingForm;
use crate::responses::{
    empty_response, html_response, json_error_response, json_response, ResultResp,
};
use crate::templates::components::published_notice;
use crate::templates::pages::{self, HomeVm};
use astra::Request;
use serde_json::json;
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, warn};
use url::Url;

/// Shared by every worker thread.
pub struct ServerContext {
    pub api: Box<dyn ListingsApi + Send + Sync>,
    pub geocoder: Option<Box<dyn Geocoder + Send + Sync>>,
    pub city: String,
}

type RequestApp<'a> = App<&'a (dyn ListingsApi + Send + Sync + 'static), MarkerLayer>;

impl ServerContext {
    pub fn new(api: Box<dyn ListingsApi + Send + Sync>, city: impl Into<String>) -> Self {
        Self {
            api,
            geocoder: None,
            city: city.into(),
        }
    }

    pub fn with_geocoder(mut self, geocoder: Box<dyn Geocoder + Send + Sync>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    /// Geocoder answer for `at`, or the coordinate text.
    fn address_for(&self, at: Coordinates) -> String {
        self.geocoder
            .as_ref()
            .and_then(|g| g.reverse(at))
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| fallback_address(&self.city, at))
    }

    /// A fresh controller for one request.
    fn app(&self) -> RequestApp<'_> {
        App::new(&*self.api, MarkerLayer::new()).with_city(self.city.clone())
    }
}

pub fn handle(req: Request, ctx: &ServerContext) -> ResultResp {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    debug!(method = method.as_str(), path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => home(&req, ctx),
        ("GET", "/board") => board(&req, ctx),
        ("GET", "/markers") => markers(ctx).or_else(|e| Ok(json_error_response(e))),
        ("GET", "/my") => my_listings(&req, ctx),
        ("GET", "/address") => address(&req, ctx),
        ("POST", "/listings") => create(req, ctx),
        ("GET", "/health") => json_response(&json!({ "status": "ok" })),
        ("GET", p) if p.starts_with("/listings/") => detail(&req, ctx, listing_id(p)?),
        ("DELETE", p) if p.starts_with("/listings/") => remove(&req, ctx, listing_id(p)?),
        _ => Err(ServerError::NotFound),
    }
}

fn home(req: &Request, ctx: &ServerContext) -> ResultResp {
    let mut app = ctx.app();
    app.start(init_data(req));

    // The page still renders on a deep link to a stale listing.
    let url = request_url(req)?;
    let focus = crate::deeplink::DeepLink::from_url(&url).map(|link| link.listing_id);
    let clean_url = app.open_deep_link(&url).map(|clean| match clean.query() {
        Some(q) => format!("{}?{q}", clean.path()),
        None => clean.path().to_string(),
    });

    let markers_json = serde_json::to_string(app.map()).map_err(|e| {
        warn!("serializing markers failed: {e}");
        ServerError::InternalError
    })?;

    html_response(pages::home_page(&HomeVm {
        viewport: app.map().viewport(),
        markers_json,
        focus,
        clean_url,
    }))
}

fn board(req: &Request, ctx: &ServerContext) -> ResultResp {
    let params = parse_query(req);
    let category = match params.get("category") {
        None => Category::default(),
        Some(raw) => Category::parse(raw)
            .ok_or_else(|| ServerError::BadRequest(format!("unknown category: {raw}")))?,
    };
    let input = FilterInput {
        search: params.get("search").cloned().unwrap_or_default(),
        min_payment: params.get("min_payment").cloned().unwrap_or_default(),
        payment_type: params.get("payment_type").cloned().unwrap_or_default(),
    };

    let mut app = ctx.app();
    app.show_board()?;
    app.switch_board_tab(category);
    let listings = app.apply_filters(input.clone());

    html_response(pages::board_page(category, &input, listings))
}

fn markers(ctx: &ServerContext) -> ResultResp {
    let mut app = ctx.app();
    app.refresh_listings()?;
    json_response(app.map())
}

fn address(req: &Request, ctx: &ServerContext) -> ResultResp {
    let at = coordinates(&parse_query(req))?;
    json_response(&json!({ "address": ctx.address_for(at) }))
}

/// Placement form post. Runs the same arm, pin and submit steps as the map.
fn create(req: Request, ctx: &ServerContext) -> ResultResp {
    let init_data = init_data(&req);
    let params = parse_form(req)?;

    let kind = match params.get("kind").map(|k| k.trim()) {
        Some("task") => ListingKind::Task,
        Some("worker") => ListingKind::Worker,
        other => {
            return Err(ServerError::BadRequest(format!(
                "unknown listing kind: {}",
                other.unwrap_or_default()
            )))
        }
    };
    let at = coordinates(&params)?;
    let field = |key: &str| params.get(key).cloned().unwrap_or_default();

    let payment = match params.get("payment").map(String::as_str) {
        Some("negotiable") => PaymentTerms::Negotiable,
        _ => PaymentTerms::Amount {
            amount: field("amount"),
            unit: field("unit"),
        },
    };
    let mut form = ListingForm {
        title: field("title"),
        description: field("description"),
        address: field("address"),
        payment,
        contacts: field("contacts"),
    };
    if form.address.trim().is_empty() {
        form.address = ctx.address_for(at);
    }

    let mut app = owner_app(init_data, ctx);
    app.arm(kind);
    app.on_map_click(at);
    let created = app.submit(&form)?;

    html_response(published_notice(created.kind, created.id))
}

fn detail(req: &Request, ctx: &ServerContext, id: ListingId) -> ResultResp {
    let mut app = ctx.app();
    let listing = app.show_listing_detail(id)?;

    if is_htmx(req) {
        html_response(pages::listing_detail(listing))
    } else {
        html_response(pages::detail_page(listing))
    }
}

fn my_listings(req: &Request, ctx: &ServerContext) -> ResultResp {
    let tab = parse_query(req)
        .get("tab")
        .and_then(|raw| Category::parse(raw))
        .unwrap_or_default();

    let mut app = owner_app(init_data(req), ctx);
    let listings = app.switch_my_listings_tab(tab)?;
    html_response(pages::my_listings_page(tab, listings))
}

fn remove(req: &Request, ctx: &ServerContext, id: ListingId) -> ResultResp {
    let mut app = owner_app(init_data(req), ctx);
    app.remove_listing(id)?;
    empty_response()
}

/// Owner-scoped routes forward the init data as is; the backend checks it.
fn owner_app(init_data: Option<String>, ctx: &ServerContext) -> RequestApp<'_> {
    let identity = match init_data {
        Some(init_data) => Identity::Telegram {
            init_data,
            user: None,
        },
        None => Identity::Local,
    };
    ctx.app().with_identity(identity)
}

fn listing_id(path: &str) -> Result<ListingId, ServerError> {
    let raw = path.trim_start_matches("/listings/");
    raw.parse()
        .map_err(|_| ServerError::BadRequest(format!("bad listing id: {raw}")))
}

fn init_data(req: &Request) -> Option<String> {
    req.headers()
        .get(INIT_DATA_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// `lat`/`lng` from query or form parameters, range-checked.
fn coordinates(params: &HashMap<String, String>) -> Result<Coordinates, ServerError> {
    let coord = |key: &str| {
        params
            .get(key)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .ok_or_else(|| ServerError::BadRequest(format!("missing or bad `{key}`")))
    };
    let at = Coordinates::new(coord("lat")?, coord("lng")?);
    if !at.is_valid() {
        return Err(ServerError::BadRequest("coordinates out of range".into()));
    }
    Ok(at)
}

const MAX_FORM_BYTES: u64 = 64 * 1024;

fn parse_form(req: Request) -> Result<HashMap<String, String>, ServerError> {
    let mut body = Vec::new();
    req.into_body()
        .reader()
        .take(MAX_FORM_BYTES)
        .read_to_end(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("unreadable body: {e}")))?;
    Ok(url::form_urlencoded::parse(&body).into_owned().collect())
}

fn is_htmx(req: &Request) -> bool {
    req.headers().contains_key("HX-Request")
}

/// Absolute form of the request target; only path and query matter.
fn request_url(req: &Request) -> Result<Url, ServerError> {
    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    Url::parse("http://localhost/")
        .and_then(|base| base.join(target))
        .map_err(|_| ServerError::BadRequest(format!("bad request target: {target}")))
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
