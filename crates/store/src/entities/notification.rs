//! Notification entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened to produce a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// Someone answered your question.
    Answer,
    /// Someone started following you.
    Follow,
    /// Someone commented on your answer.
    Comment,
    /// Your question or answer received an upvote.
    Upvote,
    /// A new question was posted in a topic you follow.
    NewQuestion,
}

impl NotificationType {
    /// Wire-format name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Answer => "answer",
            Self::Follow => "follow",
            Self::Comment => "comment",
            Self::Upvote => "upvote",
            Self::NewQuestion => "new_question",
        }
    }
}

/// What kind of entity a notification links back to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelatedType {
    Question,
    Answer,
    User,
}

/// A notification delivered to one user's inbox.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,

    /// The receiving user.
    pub user_id: String,

    #[serde(rename = "type")]
    pub notification_type: NotificationType,

    pub title: String,
    pub message: String,

    pub is_read: bool,

    /// The question/answer/user the notification refers to, if any.
    pub related_id: Option<String>,
    pub related_type: Option<RelatedType>,

    /// The user whose action produced the notification, if any.
    pub action_user_id: Option<String>,

    pub created_at: DateTime<Utc>,
}
