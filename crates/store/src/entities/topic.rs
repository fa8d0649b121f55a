//! Topic entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A topic that questions can be filed under and users can follow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,

    pub name: String,
    pub description: String,

    /// Emoji or icon identifier shown next to the topic.
    pub icon: String,

    /// Accent color used when rendering the topic.
    pub color: String,

    /// Denormalized count of questions filed under this topic.
    pub question_count: i64,

    /// Denormalized count of followers.
    pub follower_count: i64,

    pub created_at: DateTime<Utc>,
}
