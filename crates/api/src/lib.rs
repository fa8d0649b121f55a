//! HTTP API layer for quaero.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: resource-keyed JSON under `/api`
//! - **Extractors**: authenticated-user extraction from request extensions
//! - **Middleware**: bearer-token session resolution
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
