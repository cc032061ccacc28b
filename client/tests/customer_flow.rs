mod support;

use chrono::{FixedOffset, TimeZone, Utc};
use collections_client::views::FormState;
use collections_client::{Method, Route, Services};
use serde_json::json;
use shared::forms::{CustomerForm, FormContext};
use support::{assert_request, body, customer_json, Harness};

fn ctx() -> FormContext {
    FormContext::new(
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
        FixedOffset::east_opt(0).unwrap(),
    )
}

fn filled() -> CustomerForm {
    CustomerForm {
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        primary_phone: "+12125551234".into(),
        address: "1 Main St".into(),
        city: "Nairobi".into(),
        is_active: true,
        ..CustomerForm::blank()
    }
}

#[tokio::test]
async fn test_create_customer_then_return_to_list() {
    let h = Harness::signed_in("a", "r");
    let services = Services::new(&h.client);
    let route = Route::CustomerNew;
    let mut form = FormState::new(filled());

    h.transport.respond(201, customer_json(31, "Jane"));

    let payload = form.submit(&ctx()).expect("valid form");
    let created = services.customers.create(&payload).await.unwrap();
    form.succeeded();

    let request = h.transport.last();
    assert_request(&request, Method::Post, "customers/");
    let sent = body(&request);
    assert_eq!(sent["primary_phone"], "+12125551234");
    assert_eq!(sent["first_name"], "Jane");
    assert_eq!(sent["is_active"], true);

    let next = route.after_save(&created.id);
    assert_eq!(next.to_path(), "/customers");
}

#[tokio::test]
async fn test_invalid_phone_never_reaches_network() {
    let h = Harness::signed_in("a", "r");
    let mut form = FormState::new(CustomerForm {
        primary_phone: "12345".into(),
        ..filled()
    });

    assert!(form.submit(&ctx()).is_none());
    assert!(form.error("primary_phone").is_some());
    assert_eq!(h.transport.request_count(), 0);
}

#[tokio::test]
async fn test_missing_required_fields_never_reach_network() {
    let h = Harness::signed_in("a", "r");
    let mut form = FormState::new(CustomerForm::blank());

    assert!(form.submit(&ctx()).is_none());
    for field in ["first_name", "last_name", "primary_phone", "address", "city"] {
        assert!(form.error(field).is_some(), "{field}");
    }
    assert_eq!(h.transport.request_count(), 0);
}

#[tokio::test]
async fn test_server_rejection_keeps_entered_values() {
    let h = Harness::signed_in("a", "r");
    let services = Services::new(&h.client);
    let mut form = FormState::new(filled());
    h.transport.respond(
        400,
        json!({"primary_phone": ["customer with this primary phone already exists."]}),
    );

    let payload = form.submit(&ctx()).unwrap();
    let error = services.customers.create(&payload).await.unwrap_err();
    form.failed(&error);

    assert_eq!(form.values.primary_phone, "+12125551234");
    assert_eq!(
        form.error("primary_phone"),
        Some("customer with this primary phone already exists.")
    );
    assert!(!form.submitting);
}
