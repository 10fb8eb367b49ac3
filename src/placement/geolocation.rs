// src/placement/geolocation.rs

use std::fmt;
use std::time::Duration;

/// Options passed along with every position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeolocationOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Zero: never reuse a cached fix.
    pub maximum_age: Duration,
}

pub const GEOLOCATION_OPTIONS: GeolocationOptions = GeolocationOptions {
    high_accuracy: true,
    timeout: Duration::from_secs(10),
    maximum_age: Duration::ZERO,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    Unsupported,
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unknown,
}

impl GeolocationError {
    /// Maps the W3C `GeolocationPositionError.code`.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            2 => GeolocationError::PositionUnavailable,
            3 => GeolocationError::Timeout,
            _ => GeolocationError::Unknown,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            GeolocationError::Unsupported => "Геолокация не поддерживается вашим браузером",
            GeolocationError::PermissionDenied => {
                "Доступ к геолокации запрещён. Разрешите доступ в настройках браузера."
            }
            GeolocationError::PositionUnavailable => "Информация о местоположении недоступна.",
            GeolocationError::Timeout => "Время ожидания геолокации истекло.",
            GeolocationError::Unknown => "Не удалось получить геолокацию",
        }
    }
}

impl fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeolocationError::Unsupported => write!(f, "geolocation unsupported"),
            GeolocationError::PermissionDenied => write!(f, "geolocation permission denied"),
            GeolocationError::PositionUnavailable => write!(f, "position unavailable"),
            GeolocationError::Timeout => write!(f, "geolocation timed out"),
            GeolocationError::Unknown => write!(f, "geolocation failed"),
        }
    }
}

impl std::error::Error for GeolocationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_distinct_messages() {
        let errors: Vec<_> = (1..=3).map(GeolocationError::from_code).collect();
        assert_eq!(
            errors,
            vec![
                GeolocationError::PermissionDenied,
                GeolocationError::PositionUnavailable,
                GeolocationError::Timeout
            ]
        );

        let mut messages: Vec<_> = errors.iter().map(|e| e.user_message()).collect();
        messages.push(GeolocationError::Unsupported.user_message());
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), 4);
        assert_eq!(GeolocationError::from_code(42), GeolocationError::Unknown);
    }

    #[test]
    fn request_never_uses_cached_fix() {
        assert!(GEOLOCATION_OPTIONS.maximum_age.is_zero());
        assert_eq!(GEOLOCATION_OPTIONS.timeout, Duration::from_secs(10));
    }
}
