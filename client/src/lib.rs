//! API client for the collections back-office.
//!
//! Everything here is independent of the browser: the HTTP call itself goes
//! through the [`Transport`] port and credentials persist through a
//! [`CredentialStore`], so the same client drives the Yew frontend and the
//! native test suite.

pub mod api;
pub mod config;
pub mod error;
mod jwt;
pub mod routes;
pub mod services;
pub mod session;
pub mod transport;
pub mod views;

pub use api::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ApiResult};
pub use routes::{Route, RowLinks};
pub use services::Services;
pub use session::{CredentialStore, MemoryStore, Session, SessionEvent, StoreError, StoredSession};
pub use transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};
