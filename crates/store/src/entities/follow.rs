//! Follow entity (user→user and user→topic edges).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of subject a follow edge points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowingType {
    User,
    Topic,
}

impl FollowingType {
    /// Wire-format name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Topic => "topic",
        }
    }
}

/// A directed follow edge.
///
/// The repository enforces at most one edge per
/// `(follower_id, following_id, following_type)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,

    /// The following user.
    pub follower_id: String,

    /// The followed user or topic.
    pub following_id: String,

    pub following_type: FollowingType,

    pub created_at: DateTime<Utc>,
}
