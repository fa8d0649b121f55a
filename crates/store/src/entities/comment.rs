//! Comment entity (flat, no nesting).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on an answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,

    pub content: String,

    /// The answer being commented on.
    pub answer_id: String,

    /// The commenting user.
    pub author_id: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
