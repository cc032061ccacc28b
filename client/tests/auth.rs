mod support;

use collections_client::{ApiError, Method};
use serde_json::json;
use shared::{Credentials, Customer, Role};
use support::{assert_request, body, customer_json, user_json, Harness};

#[tokio::test]
async fn test_refresh_then_retry_once_with_new_token() {
    let h = Harness::signed_in("old-access", "refresh-1");
    h.transport
        .respond(401, json!({"detail": "Given token not valid for any token type"}))
        .respond(200, json!({"access": "new-access"}))
        .respond(200, customer_json(4, "Jane"));

    let customer: Customer = h.client.get("customers/4/").await.unwrap();
    assert_eq!(customer.first_name, "Jane");

    let requests = h.transport.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].bearer_token(), Some("old-access"));
    assert_request(&requests[1], Method::Post, "token/refresh/");
    assert_eq!(requests[1].bearer_token(), None);
    assert_eq!(body(&requests[1]), json!({"refresh": "refresh-1"}));
    assert_request(&requests[2], Method::Get, "customers/4/");
    assert_eq!(requests[2].bearer_token(), Some("new-access"));

    let stored = h.stored().unwrap();
    assert_eq!(stored.access, "new-access");
    assert_eq!(stored.refresh.as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn test_rotated_refresh_token_is_kept() {
    let h = Harness::signed_in("a1", "r1");
    h.transport
        .respond(401, json!({}))
        .respond(200, json!({"access": "a2", "refresh": "r2"}))
        .respond_empty(204);

    h.client.delete("customers/4/").await.unwrap();
    assert_eq!(h.client.session().refresh_token().as_deref(), Some("r2"));
}

#[tokio::test]
async fn test_failed_refresh_expires_session() {
    let h = Harness::signed_in("old-access", "stale-refresh");
    h.transport
        .respond(401, json!({}))
        .respond(401, json!({"detail": "Token is blacklisted"}));

    let result: Result<Customer, _> = h.client.get("customers/4/").await;
    assert_eq!(result.unwrap_err(), ApiError::SessionExpired);
    assert_eq!(h.transport.request_count(), 2);
    assert!(!h.client.session().is_authenticated());
    assert_eq!(h.stored(), None);
}

#[tokio::test]
async fn test_second_401_is_not_retried_again() {
    let h = Harness::signed_in("a1", "r1");
    h.transport
        .respond(401, json!({}))
        .respond(200, json!({"access": "a2"}))
        .respond(401, json!({"detail": "Still not allowed"}));

    let result: Result<Customer, _> = h.client.get("customers/4/").await;
    let error = result.unwrap_err();
    assert_eq!(error.status(), Some(401));
    assert_eq!(error.user_message(), "Still not allowed");
    assert_eq!(h.transport.request_count(), 3);
}

#[tokio::test]
async fn test_401_without_refresh_token() {
    let h = Harness::signed_out();
    h.transport.respond(401, json!({"detail": "Authentication credentials were not provided."}));

    let result: Result<Customer, _> = h.client.get("customers/4/").await;
    assert_eq!(result.unwrap_err(), ApiError::SessionExpired);
    assert_eq!(h.transport.request_count(), 1);
}

#[tokio::test]
async fn test_login_with_embedded_user() {
    let h = Harness::signed_out();
    h.transport.respond(
        200,
        json!({"access": "a", "refresh": "r", "user": user_json("9", "collection_officer")}),
    );

    let user = h
        .client
        .login(&Credentials {
            username: "officer".into(),
            password: "secret-password".into(),
        })
        .await
        .unwrap();

    assert_eq!(user.role, Role::CollectionOfficer);
    let request = h.transport.last();
    assert_request(&request, Method::Post, "token/");
    assert_eq!(request.bearer_token(), None);
    assert!(h.client.session().is_authenticated());
    assert_eq!(h.stored().unwrap().user.unwrap().id.as_str(), "9");
}

#[tokio::test]
async fn test_login_resolves_user_from_token_claim() {
    use base64::{engine::general_purpose, Engine as _};
    let claims = general_purpose::URL_SAFE_NO_PAD.encode(r#"{"user_id": 12}"#);
    let access = format!("h.{claims}.s");

    let h = Harness::signed_out();
    h.transport
        .respond(200, json!({"access": access, "refresh": "r"}))
        .respond(200, user_json("12", "calling_agent"));

    let user = h
        .client
        .login(&Credentials {
            username: "agent".into(),
            password: "pw".into(),
        })
        .await
        .unwrap();

    assert_eq!(user.id.as_str(), "12");
    let lookup = h.transport.last();
    assert_request(&lookup, Method::Get, "users/12/");
    assert_eq!(lookup.bearer_token(), Some(access.as_str()));
}

#[tokio::test]
async fn test_bad_credentials_do_not_refresh() {
    let h = Harness::signed_out();
    h.transport
        .respond(401, json!({"detail": "No active account found with the given credentials"}));

    let error = h
        .client
        .login(&Credentials {
            username: "x".into(),
            password: "y".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(error.user_message(), "No active account found with the given credentials");
    assert_eq!(h.transport.request_count(), 1);
    assert!(!h.client.session().is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_store() {
    let h = Harness::signed_in("a", "r");
    h.client.logout();
    assert_eq!(h.stored(), None);
    assert_eq!(h.client.session().access_token(), None);
}
