//! Reads claims from an access token. Nothing here verifies signatures;
//! the server does that on every request.

use base64::{engine::general_purpose, Engine as _};
use serde_json::Value;
use shared::Id;

/// The `user_id` claim of a JWT, as issued by SimpleJWT.
pub(crate) fn user_id(token: &str) -> Option<Id> {
    let payload = token.split('.').nth(1)?;
    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    match claims.get("user_id")? {
        Value::String(s) if !s.is_empty() => Some(Id::from(s.as_str())),
        Value::Number(n) => n.as_i64().map(Id::from),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn token_for(user_id: &str) -> String {
    let claims = format!(r#"{{"token_type":"access","user_id":{user_id}}}"#);
    format!(
        "header.{}.signature",
        general_purpose::URL_SAFE_NO_PAD.encode(claims)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_claims() {
        assert_eq!(user_id(&token_for("42")), Some(Id::from("42")));
        assert_eq!(user_id(&token_for("\"abc\"")), Some(Id::from("abc")));
    }

    #[test]
    fn test_malformed_tokens() {
        assert_eq!(user_id("not-a-jwt"), None);
        assert_eq!(user_id("a.%%%.c"), None);
        assert_eq!(user_id(&token_for("null")), None);
    }
}
