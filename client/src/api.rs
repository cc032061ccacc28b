use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{Credentials, ListQuery, Paginated, RefreshRequest, RefreshResponse, TokenResponse, User};
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::jwt;
use crate::session::Session;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};

const TOKEN_PATH: &str = "token/";
const TOKEN_REFRESH_PATH: &str = "token/refresh/";

/// Typed access to the collections REST API.
///
/// Every request carries the session's bearer token. A 401 triggers one
/// token refresh followed by one retry of the original request; if the
/// refresh is impossible or rejected the session is expired and the caller
/// gets [`ApiError::SessionExpired`].
#[derive(Clone)]
pub struct ApiClient {
    inner: Rc<Inner>,
}

struct Inner {
    config: ClientConfig,
    transport: Rc<dyn Transport>,
    session: Rc<Session>,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl ApiClient {
    pub fn new(config: ClientConfig, transport: Rc<dyn Transport>, session: Rc<Session>) -> Self {
        Self {
            inner: Rc::new(Inner {
                config,
                transport,
                session,
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn session(&self) -> &Rc<Session> {
        &self.inner.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.execute(self.request(Method::Get, path)).await?;
        decode(&response)
    }

    /// One page of a list endpoint. The configured page size applies unless
    /// the query sets its own.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> ApiResult<Paginated<T>> {
        let mut query = query.clone();
        if query.page_size.is_none() {
            query.page_size = Some(self.inner.config.page_size);
        }
        let request = self.request(Method::Get, path).with_query(query.to_pairs());
        let response = self.execute(request).await?;
        decode(&response)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::Post, path).with_json(body)?;
        decode(&self.execute(request).await?)
    }

    /// POST without a body, for actions such as `approve`.
    pub async fn post_action<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        decode(&self.execute(self.request(Method::Post, path)).await?)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::Put, path).with_json(body)?;
        decode(&self.execute(request).await?)
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::Patch, path).with_json(body)?;
        decode(&self.execute(request).await?)
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.execute(self.request(Method::Delete, path)).await?;
        Ok(())
    }

    /// Exchange credentials for tokens and resolve the signed-in user.
    ///
    /// When the token response does not embed the user, the `user_id` claim
    /// of the access token is used to load it.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<User> {
        let request = self.request(Method::Post, TOKEN_PATH).with_json(credentials)?;
        let tokens: TokenResponse = decode(&self.call(request, false).await?)?;

        let session = &self.inner.session;
        session.establish(tokens.access.clone(), tokens.refresh);

        let user = match tokens.user {
            Some(user) => user,
            None => match self.fetch_token_user(&tokens.access).await {
                Ok(user) => user,
                Err(e) => {
                    warn!("Could not resolve signed-in user: {}", e);
                    session.clear();
                    return Err(e);
                }
            },
        };

        session.set_user(user.clone());
        Ok(user)
    }

    async fn fetch_token_user(&self, access: &str) -> ApiResult<User> {
        let id = jwt::user_id(access)
            .ok_or_else(|| ApiError::Decode("access token carries no user id".to_string()))?;
        self.get(&format!("users/{id}/")).await
    }

    pub fn logout(&self) {
        self.inner.session.clear();
    }

    /// Trade the refresh token for a new access token.
    pub async fn refresh_access_token(&self) -> ApiResult<()> {
        let refresh = self
            .inner
            .session
            .refresh_token()
            .ok_or(ApiError::NotAuthenticated)?;
        let request = self
            .request(Method::Post, TOKEN_REFRESH_PATH)
            .with_json(&RefreshRequest { refresh })?;
        let tokens: RefreshResponse = decode(&self.call(request, false).await?)?;
        self.inner.session.refresh(tokens.access, tokens.refresh);
        info!("Access token refreshed");
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> HttpRequest {
        HttpRequest::new(method, self.inner.config.endpoint(path))
    }

    /// Send with the refresh-and-retry policy.
    async fn execute(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let exempt = is_token_endpoint(&request.url);
        let response = self.dispatch(request.clone(), !exempt).await?;

        if response.status != 401 || exempt {
            return check(response);
        }

        debug!(url = %request.url, "Received 401, attempting token refresh");
        if let Err(e) = self.refresh_access_token().await {
            warn!("Token refresh failed: {}", e);
            self.inner.session.expire();
            return Err(ApiError::SessionExpired);
        }

        // Exactly one retry; a second 401 goes back to the caller.
        check(self.dispatch(request, true).await?)
    }

    /// Send once, no retry.
    async fn call(&self, request: HttpRequest, authorize: bool) -> ApiResult<HttpResponse> {
        check(self.dispatch(request, authorize).await?)
    }

    async fn dispatch(&self, mut request: HttpRequest, authorize: bool) -> ApiResult<HttpResponse> {
        if authorize {
            if let Some(token) = self.inner.session.access_token() {
                request.set_header("Authorization", format!("Bearer {token}"));
            }
        }
        debug!(method = request.method.as_str(), url = %request.url, "API request");
        let response = self.inner.transport.send(request).await?;
        debug!(status = response.status, "API response");
        Ok(response)
    }
}

/// Token endpoints never carry a bearer token and never trigger a refresh.
fn is_token_endpoint(url: &str) -> bool {
    [TOKEN_PATH, TOKEN_REFRESH_PATH]
        .iter()
        .any(|path| url.ends_with(&format!("/{path}")))
}

fn check(response: HttpResponse) -> ApiResult<HttpResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        let error = ApiError::from_response(response.status, &response.body);
        warn!(status = response.status, "API error: {}", error.user_message());
        Err(error)
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> ApiResult<T> {
    // Action endpoints may answer 204; treat an empty body as JSON null so
    // `()` and `Option<_>` decode.
    let body = if response.body.trim().is_empty() {
        "null"
    } else {
        response.body.as_str()
    };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_endpoints_are_exempt() {
        assert!(is_token_endpoint("http://h/api/token/"));
        assert!(is_token_endpoint("http://h/api/token/refresh/"));
        assert!(!is_token_endpoint("http://h/api/customers/"));
        assert!(!is_token_endpoint("http://h/api/csrftoken/"));
    }

    #[test]
    fn test_empty_body_decodes_as_unit() {
        let unit: ApiResult<()> = decode(&HttpResponse::new(204, ""));
        assert!(unit.is_ok());
        let bad: ApiResult<u32> = decode(&HttpResponse::new(200, "{"));
        assert!(matches!(bad, Err(ApiError::Decode(_))));
    }
}
