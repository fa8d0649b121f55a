//! Domain entities.
//!
//! Flat records keyed by ULID strings. Cross-entity references are string-id
//! matching; the repositories enforce the uniqueness invariants.

pub mod answer;
pub mod comment;
pub mod follow;
pub mod notification;
pub mod question;
pub mod report;
pub mod topic;
pub mod user;
pub mod vote;
