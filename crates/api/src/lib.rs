//! ShortURL API Library
//!
//! This crate contains the HTTP server components: configuration, URL
//! validation, DNS lookup and the route handlers.

pub mod config;
pub mod dns;
pub mod error;
pub mod routes;
pub mod state;
pub mod validation;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
