use astra::Server;
use pinboard::api::HttpListingsApi;
use pinboard::config::Config;
use pinboard::geocode::NominatimGeocoder;
use pinboard::router::{handle, ServerContext};
use pinboard::{logging, templates};
use tracing::{error, info, warn};

fn main() {
    logging::init();

    // 1️⃣ Settings
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // 2️⃣ Listings backend client
    let api = match HttpListingsApi::new(&config.api_url, config.http_timeout) {
        Ok(api) => api,
        Err(e) => {
            error!("❌ Listings backend client failed: {e}");
            std::process::exit(1);
        }
    };
    let mut ctx = ServerContext::new(Box::new(api), config.city.clone());

    if let Some(url) = &config.geocoder_url {
        match NominatimGeocoder::new(url, &config.geocoder_lang, config.http_timeout) {
            Ok(geocoder) => ctx = ctx.with_geocoder(Box::new(geocoder)),
            Err(e) => warn!("reverse geocoding disabled: {e}"),
        }
    }

    // 3️⃣ Start the server
    info!(
        api = %config.api_url,
        workers = config.workers,
        "Starting server at http://{}",
        config.bind
    );

    let server = Server::bind(&config.bind).max_workers(config.workers);

    // 4️⃣ Serve requests, passing the context into the closure
    let result = server.serve(move |req, _info| match handle(req, &ctx) {
        Ok(resp) => resp,
        Err(err) => {
            if err.status() >= 500 {
                error!("request failed: {err}");
            }
            templates::html_error_response(err)
        }
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
    }

    info!("Server shut down cleanly.");
}
