//! Answer entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An answer to a question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,

    pub content: String,

    /// The question being answered.
    pub question_id: String,

    /// The answering user.
    pub author_id: String,

    /// Set by the question author; at most one accepted answer per question.
    pub is_accepted: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
