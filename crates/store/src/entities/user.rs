//! User entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,

    /// Display name.
    pub name: String,

    /// Email address, unique per account (case-insensitive).
    pub email: String,

    /// Argon2 password hash. Never serialized into API responses.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub avatar: Option<String>,
    pub bio: Option<String>,

    /// Reputation score, adjusted when the user's content is voted on.
    pub reputation: i64,

    /// Whether the user may review moderation reports.
    pub is_moderator: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
