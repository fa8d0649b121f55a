//! Vote entity (upvotes/downvotes on questions and answers).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of content a vote points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Question,
    Answer,
}

impl TargetType {
    /// Wire-format name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Answer => "answer",
        }
    }
}

/// Vote direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl VoteType {
    /// Wire-format name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upvote => "upvote",
            Self::Downvote => "downvote",
        }
    }

    /// Reputation delta granted to the content author for this vote.
    #[must_use]
    pub const fn reputation_delta(self) -> i64 {
        match self {
            Self::Upvote => 10,
            Self::Downvote => -2,
        }
    }
}

/// A single user's vote on a single target.
///
/// The repository enforces at most one vote per
/// `(user_id, target_id, target_type)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,

    /// The voting user.
    pub user_id: String,

    /// The question or answer being voted on.
    pub target_id: String,

    pub target_type: TargetType,

    #[serde(rename = "type")]
    pub vote_type: VoteType,

    pub created_at: DateTime<Utc>,
}
