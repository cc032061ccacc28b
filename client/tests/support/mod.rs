//! Scripted transport and fixtures shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use collections_client::{
    ApiClient, ClientConfig, CredentialStore, HttpRequest, HttpResponse, MemoryStore, Method, Session,
    StoredSession, Transport, TransportError,
};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub const BASE: &str = "http://api.test/api/";

/// Answers requests from a queue, in order, and remembers what was sent.
#[derive(Default)]
pub struct FakeTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: Value) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body.to_string())));
        self
    }

    pub fn respond_empty(&self, status: u16) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, "")));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(Err(TransportError::Network(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last(&self) -> HttpRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".into())))
    }
}

pub struct Harness {
    pub transport: Rc<FakeTransport>,
    pub store: Rc<MemoryStore>,
    pub client: ApiClient,
}

impl Harness {
    pub fn signed_out() -> Self {
        Self::build(MemoryStore::new())
    }

    pub fn signed_in(access: &str, refresh: &str) -> Self {
        Self::build(MemoryStore::with_session(StoredSession {
            access: access.to_string(),
            refresh: Some(refresh.to_string()),
            user: Some(serde_json::from_value(user_json("1", "manager")).expect("fixture user")),
        }))
    }

    fn build(store: MemoryStore) -> Self {
        let transport = FakeTransport::new();
        let store = Rc::new(store);
        let session = Session::init(store.clone());
        let config = ClientConfig::new(BASE).expect("test config");
        let client = ApiClient::new(config, transport.clone(), session);
        Self {
            transport,
            store,
            client,
        }
    }

    pub fn stored(&self) -> Option<StoredSession> {
        self.store.load().expect("memory store never fails")
    }
}

pub fn url(path: &str) -> String {
    format!("{BASE}{path}")
}

pub fn assert_request(request: &HttpRequest, method: Method, path: &str) {
    assert_eq!(request.method, method, "method of {}", request.url);
    assert_eq!(request.url, url(path));
}

pub fn body(request: &HttpRequest) -> Value {
    serde_json::from_str(request.body.as_deref().expect("request has a body")).expect("json body")
}

pub fn page(results: Vec<Value>, count: u64) -> Value {
    json!({"count": count, "next": null, "previous": null, "results": results})
}

pub fn user_json(id: &str, role: &str) -> Value {
    json!({
        "id": id,
        "username": format!("user{id}"),
        "email": format!("user{id}@example.com"),
        "first_name": "Test",
        "last_name": "User",
        "role": role,
        "is_active": true
    })
}

pub fn customer_json(id: u32, first_name: &str) -> Value {
    json!({
        "id": id,
        "first_name": first_name,
        "last_name": "Doe",
        "primary_phone": "+12125551234",
        "address": "1 Main St",
        "city": "Nairobi",
        "is_active": true
    })
}

pub fn loan_json(id: u32, status: &str) -> Value {
    json!({
        "id": id,
        "loan_reference": format!("LN-{id:04}"),
        "customer": 4,
        "principal_amount": "1000.00",
        "interest_rate": "12.50",
        "term_months": 12,
        "payment_frequency": "monthly",
        "status": status,
        "application_date": "2024-01-31"
    })
}
