// errors.rs
use crate::api::ApiError;
use crate::placement::FormField;
use std::fmt;

/// Errors surfaced by the board front server.
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    Unauthorized(String),
    /// The listings backend failed in a way the caller can't fix.
    Upstream(ApiError),
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Unauthorized(_) => 401,
            ServerError::Upstream(_) => 502,
            ServerError::InternalError => 500,
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            ServerError::Upstream(err) => write!(f, "Listings backend error: {err}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<ApiError> for ServerError {
    fn from(err: ApiError) -> Self {
        match err.status() {
            Some(404) => ServerError::NotFound,
            Some(401) | Some(403) => {
                ServerError::Unauthorized(err.detail().unwrap_or("access denied").to_string())
            }
            Some(400) | Some(422) => {
                ServerError::BadRequest(err.detail().unwrap_or("rejected").to_string())
            }
            _ => ServerError::Upstream(err),
        }
    }
}

impl From<AppError> for ServerError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::TelegramOnly => ServerError::Unauthorized(err.user_message("")),
            AppError::Api(api) => api.into(),
        }
    }
}

impl From<SubmitError> for ServerError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Api(api) => api.into(),
            other => ServerError::BadRequest(other.user_message()),
        }
    }
}

/// Controller operations other than submission.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Owner-scoped operation attempted without Telegram init data.
    TelegramOnly,
    Api(ApiError),
}

impl AppError {
    /// Text for the user. `fallback` is used when the server said nothing useful.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::TelegramOnly => "Эта функция доступна только в Telegram".to_string(),
            AppError::Api(err) => match err.detail() {
                Some(detail) => format!("Ошибка: {detail}"),
                None => fallback.to_string(),
            },
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::TelegramOnly => write!(f, "operation requires Telegram identity"),
            AppError::Api(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::Api(err)
    }
}

/// Why a listing submission did not go through. The session is left as it was.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// No pin on the map; nothing was sent.
    MissingCoordinates,
    MissingField(FormField),
    Api(ApiError),
}

impl SubmitError {
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::MissingCoordinates => {
                "Выберите место на карте или используйте геолокацию".to_string()
            }
            SubmitError::MissingField(field) => format!("Заполните поле «{field}»"),
            SubmitError::Api(err) => format!(
                "Ошибка: {}",
                err.detail().unwrap_or("Не удалось опубликовать")
            ),
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::MissingCoordinates => write!(f, "no coordinates picked"),
            SubmitError::MissingField(field) => write!(f, "missing field: {field}"),
            SubmitError::Api(err) => write!(f, "submit failed: {err}"),
        }
    }
}

impl std::error::Error for SubmitError {}

impl From<ApiError> for SubmitError {
    fn from(err: ApiError) -> Self {
        SubmitError::Api(err)
    }
}
