use crate::domain::listing::{ListingId, ListingKind};
use serde::Deserialize;
use serde_json::Value;

/// `POST /api/auth/telegram` answer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthUser {
    pub user_id: i64,
    pub telegram_id: i64,
    pub username: Option<String>,
}

/// `POST /api/listings` answer. Only a summary; the full listing comes
/// with the next refresh.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedListing {
    pub id: ListingId,
    #[serde(rename = "type")]
    pub kind: ListingKind,
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Error body. `detail` is a plain string for handler errors and a list of
/// `{loc, msg, type}` objects for request validation errors.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: Value,
}

impl ErrorBody {
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                if msgs.is_empty() {
                    None
                } else {
                    Some(msgs.join("; "))
                }
            }
            _ => None,
        }
    }
}

/// Server detail from a raw error body, if it has one.
pub fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail() {
        assert_eq!(
            error_detail(r#"{"detail":"Неверные данные Telegram"}"#).as_deref(),
            Some("Неверные данные Telegram")
        );
    }

    #[test]
    fn validation_detail_list() {
        let body = r#"{"detail":[
            {"loc":["body","title"],"msg":"field required","type":"value_error.missing"},
            {"loc":["body","latitude"],"msg":"value is not a valid float","type":"type_error.float"}
        ]}"#;
        assert_eq!(
            error_detail(body).as_deref(),
            Some("field required; value is not a valid float")
        );
    }

    #[test]
    fn missing_or_odd_detail() {
        assert_eq!(error_detail("Internal Server Error"), None);
        assert_eq!(error_detail(r#"{"detail":null}"#), None);
        assert_eq!(error_detail(r#"{"message":"x"}"#), None);
    }

    #[test]
    fn created_listing_summary() {
        let created: CreatedListing =
            serde_json::from_str(r#"{"id":12,"type":"task","title":"t","status":"active"}"#)
                .unwrap();
        assert_eq!(created.id, 12);
        assert_eq!(created.kind, ListingKind::Task);
    }
}
