//! Report entity (moderation flags raised against content).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of content a report points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTargetType {
    Question,
    Answer,
    Comment,
}

impl ReportTargetType {
    /// Wire-format name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Answer => "answer",
            Self::Comment => "comment",
        }
    }
}

/// Why the content was reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportReason {
    Spam,
    Harassment,
    Inappropriate,
    Misinformation,
    Other,
}

/// Report lifecycle. `Pending` transitions to exactly one of `Resolved` or
/// `Dismissed`; both are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    /// Wire-format name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
            Self::Dismissed => "dismissed",
        }
    }
}

/// A moderation report raised by a user against a question/answer/comment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,

    /// The reporting user.
    pub reporter_id: String,

    /// The reported question/answer/comment.
    pub target_id: String,
    pub target_type: ReportTargetType,

    pub reason: ReportReason,
    pub description: String,

    pub status: ReportStatus,

    /// Review stamp, written once at the pending→resolved/dismissed
    /// transition.
    pub moderator_notes: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<String>,

    pub created_at: DateTime<Utc>,
}
