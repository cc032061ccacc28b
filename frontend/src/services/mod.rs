pub mod api;
pub mod logging;
pub mod navigator;
pub mod session_store;
pub mod toasts;
