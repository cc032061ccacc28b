//! HTTP port.
//!
//! The client never talks to the network itself. A [`Transport`] takes a
//! fully built request and hands back the raw status and body; the browser
//! build plugs in `gloo-net`, tests plug in a scripted fake.

use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Unencoded pairs; the transport encodes them.
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, TransportError> {
        let json = serde_json::to_string(body).map_err(|e| TransportError::Request(e.to_string()))?;
        self.headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        self.body = Some(json);
        Ok(self)
    }

    /// Replace any existing header with the same name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.header("Authorization")
            .and_then(|value| value.strip_prefix("Bearer "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request could not be sent: {0}")]
    Network(String),
    #[error("request could not be built: {0}")]
    Request(String),
}

#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_header_replaces() {
        let mut request = HttpRequest::new(Method::Get, "http://x/");
        request.set_header("Authorization", "Bearer one");
        request.set_header("authorization", "Bearer two");
        assert_eq!(request.bearer_token(), Some("two"));
        assert_eq!(
            request.headers.iter().filter(|(n, _)| n.eq_ignore_ascii_case("authorization")).count(),
            1
        );
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let request = HttpRequest::new(Method::Post, "http://x/")
            .with_json(&serde_json::json!({"a": 1}))
            .unwrap();
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.body.as_deref(), Some(r#"{"a":1}"#));
    }
}
