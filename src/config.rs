// config.rs
//
// Server settings, read from `PINBOARD_*` environment variables.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/reverse";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind: SocketAddr,
    pub api_url: String,
    /// `None` disables reverse geocoding.
    pub geocoder_url: Option<String>,
    pub geocoder_lang: String,
    pub city: String,
    pub http_timeout: Duration,
    pub workers: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for {}: {:?}", self.var, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let bind = parse("PINBOARD_BIND", get("PINBOARD_BIND", DEFAULT_BIND))?;
        let timeout: u64 = parse(
            "PINBOARD_HTTP_TIMEOUT_SECS",
            get("PINBOARD_HTTP_TIMEOUT_SECS", "15"),
        )?;
        let workers: usize = parse("PINBOARD_WORKERS", get("PINBOARD_WORKERS", "8"))?;
        if workers == 0 {
            return Err(ConfigError {
                var: "PINBOARD_WORKERS",
                value: "0".into(),
            });
        }

        // Set but empty means "no geocoder"; unset means the public default.
        let geocoder_url = match lookup("PINBOARD_GEOCODER_URL") {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(v.trim().to_string()),
            None => Some(DEFAULT_GEOCODER_URL.to_string()),
        };

        Ok(Self {
            bind,
            api_url: get("PINBOARD_API_URL", DEFAULT_API_URL),
            geocoder_url,
            geocoder_lang: get("PINBOARD_GEOCODER_LANG", "ru"),
            city: get("PINBOARD_CITY", crate::app::DEFAULT_CITY),
            http_timeout: Duration::from_secs(timeout),
            workers,
        })
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError { var, value })
}
