//! Question entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A question asked by a user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,

    pub title: String,
    pub content: String,

    /// The asking user.
    pub author_id: String,

    /// Optional topic the question is filed under.
    pub topic_id: Option<String>,

    /// Unique trimmed tags, at most five, each 2-20 characters.
    pub tags: Vec<String>,

    /// Denormalized count of answers, maintained at answer creation.
    pub answer_count: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
