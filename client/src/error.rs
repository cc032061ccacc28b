use serde_json::Value;
use shared::FieldErrors;

use crate::config::ConfigError;
use crate::transport::TransportError;

pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("request failed with status {status}")]
    Http {
        status: u16,
        detail: Option<String>,
        field_errors: FieldErrors,
    },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("session expired")]
    SessionExpired,
    #[error("not signed in")]
    NotAuthenticated,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        ApiError::Transport(error.to_string())
    }
}

impl ApiError {
    /// Build an HTTP error from a non-2xx response, reading the error body
    /// shapes Django REST Framework produces:
    /// `{"detail": ".."}`, `{"field": ["..", ..]}`, `{"non_field_errors": [..]}`
    /// and a bare list of messages.
    pub fn from_response(status: u16, body: &str) -> Self {
        let mut detail = None;
        let mut field_errors = FieldErrors::new();

        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => {
                for (key, value) in map {
                    let Some(message) = first_message(&value) else {
                        continue;
                    };
                    match key.as_str() {
                        "detail" | "non_field_errors" | "error" | "message" => {
                            detail.get_or_insert(message);
                        }
                        _ => field_errors.insert(&key, message),
                    }
                }
            }
            Ok(value @ (Value::Array(_) | Value::String(_))) => {
                detail = first_message(&value);
            }
            _ => {}
        }

        ApiError::Http {
            status,
            detail,
            field_errors,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    /// The session is gone and the user has to sign in again.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::SessionExpired | ApiError::NotAuthenticated)
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Http { field_errors, .. } if !field_errors.is_empty() => Some(field_errors),
            _ => None,
        }
    }

    /// Text for a toast: the server's detail, then its first field error,
    /// then a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http {
                detail, field_errors, ..
            } => detail
                .clone()
                .or_else(|| {
                    field_errors
                        .first()
                        .map(|(field, message)| format!("{}: {}", humanize(field), message))
                })
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            ApiError::SessionExpired => "Your session has expired. Please sign in again.".to_string(),
            ApiError::NotAuthenticated => "Please sign in to continue.".to_string(),
            _ => FALLBACK_MESSAGE.to_string(),
        }
    }
}

fn first_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_message),
        // Nested serializer errors: report the first inner message.
        Value::Object(map) => map.values().find_map(first_message),
        _ => None,
    }
}

fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_body() {
        let error = ApiError::from_response(403, r#"{"detail": "You do not have permission."}"#);
        assert!(error.is_forbidden());
        assert_eq!(error.user_message(), "You do not have permission.");
    }

    #[test]
    fn test_field_errors_body() {
        let error = ApiError::from_response(
            400,
            r#"{"primary_phone": ["Customer with this phone already exists."], "email": ["Enter a valid email address."]}"#,
        );
        let fields = error.field_errors().unwrap();
        assert_eq!(fields.get("primary_phone"), Some("Customer with this phone already exists."));
        assert_eq!(error.user_message(), "Email: Enter a valid email address.");
    }

    #[test]
    fn test_non_field_errors_become_detail() {
        let error = ApiError::from_response(400, r#"{"non_field_errors": ["Loan is not pending."]}"#);
        assert_eq!(error.user_message(), "Loan is not pending.");
        assert!(error.field_errors().is_none());
    }

    #[test]
    fn test_unparseable_body_falls_back() {
        let error = ApiError::from_response(500, "<html>Server Error</html>");
        assert_eq!(error.user_message(), FALLBACK_MESSAGE);
        assert_eq!(ApiError::Transport("offline".into()).user_message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_bare_list_body() {
        let error = ApiError::from_response(400, r#"["Cannot write off a paid loan."]"#);
        assert_eq!(error.user_message(), "Cannot write off a paid loan.");
    }
}
