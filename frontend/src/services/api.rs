use async_trait::async_trait;
use collections_client::{HttpRequest, HttpResponse, Method, Transport, TransportError};
use gloo::net::http::{Request, RequestBuilder};

/// Sends API requests with the browser's `fetch` through `gloo-net`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl GlooTransport {
    fn builder(request: &HttpRequest) -> RequestBuilder {
        let url = request.url.as_str();
        let mut builder = match request.method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Patch => Request::patch(url),
            Method::Delete => Request::delete(url),
        };
        if !request.query.is_empty() {
            builder = builder.query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        builder
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let builder = Self::builder(&request);
        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::Request(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(format!("Failed to read response: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}
