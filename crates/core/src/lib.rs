//! Core business logic for quaero.

pub mod sanitize;
pub mod services;
pub mod validation;

pub use services::*;

/// Generate a unique ID using ULID.
pub fn generate_id() -> String {
    ulid::Ulid::new().to_string().to_lowercase()
}
