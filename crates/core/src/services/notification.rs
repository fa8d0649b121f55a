//! Notification service.
//!
//! Store-and-poll only: producers append to the receiving user's inbox and
//! readers page through it newest-first. There is no push channel.

use chrono::Utc;
use quaero_common::{AppResult, IdGenerator};
use quaero_store::entities::notification::{self, NotificationType, RelatedType};
use quaero_store::entities::{question, user};
use quaero_store::repositories::NotificationRepository;

/// Notification service for business logic.
#[derive(Clone)]
pub struct NotificationService {
    notification_repo: NotificationRepository,
    id_gen: IdGenerator,
}

impl NotificationService {
    /// Create a new notification service.
    #[must_use]
    pub const fn new(notification_repo: NotificationRepository) -> Self {
        Self {
            notification_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Notify a question author that their question was answered.
    pub async fn create_answer_notification(
        &self,
        notifiee_id: &str,
        action_user: &user::Model,
        question: &question::Model,
    ) -> AppResult<notification::Model> {
        self.create_internal(
            notifiee_id,
            NotificationType::Answer,
            "New Answer",
            format!(
                "{} answered your question \"{}\"",
                action_user.name, question.title
            ),
            Some(&question.id),
            Some(RelatedType::Question),
            Some(&action_user.id),
        )
        .await
    }

    /// Notify a user that someone started following them.
    pub async fn create_follow_notification(
        &self,
        notifiee_id: &str,
        action_user: &user::Model,
    ) -> AppResult<notification::Model> {
        self.create_internal(
            notifiee_id,
            NotificationType::Follow,
            "New Follower",
            format!("{} started following you", action_user.name),
            None,
            None,
            Some(&action_user.id),
        )
        .await
    }

    /// Notify an answer author that their answer received a comment.
    pub async fn create_comment_notification(
        &self,
        notifiee_id: &str,
        action_user: &user::Model,
        answer_id: &str,
    ) -> AppResult<notification::Model> {
        self.create_internal(
            notifiee_id,
            NotificationType::Comment,
            "New Comment",
            format!("{} commented on your answer", action_user.name),
            Some(answer_id),
            Some(RelatedType::Answer),
            Some(&action_user.id),
        )
        .await
    }

    /// Notify a content author that their question or answer was upvoted.
    pub async fn create_upvote_notification(
        &self,
        notifiee_id: &str,
        related_id: &str,
        related_type: RelatedType,
    ) -> AppResult<notification::Model> {
        let (title, message) = match related_type {
            RelatedType::Answer => ("Answer Upvoted", "Your answer received an upvote"),
            _ => ("Question Upvoted", "Your question received an upvote"),
        };
        self.create_internal(
            notifiee_id,
            NotificationType::Upvote,
            title,
            message.to_string(),
            Some(related_id),
            Some(related_type),
            None,
        )
        .await
    }

    /// Notify a topic follower that a new question was posted in the topic.
    pub async fn create_new_question_notification(
        &self,
        notifiee_id: &str,
        action_user: &user::Model,
        question: &question::Model,
        topic_name: &str,
    ) -> AppResult<notification::Model> {
        self.create_internal(
            notifiee_id,
            NotificationType::NewQuestion,
            "New Question",
            format!("{} asked a new question in {}", action_user.name, topic_name),
            Some(&question.id),
            Some(RelatedType::Question),
            Some(&action_user.id),
        )
        .await
    }

    /// Internal helper to create notifications.
    async fn create_internal(
        &self,
        notifiee_id: &str,
        notification_type: NotificationType,
        title: &str,
        message: String,
        related_id: Option<&str>,
        related_type: Option<RelatedType>,
        action_user_id: Option<&str>,
    ) -> AppResult<notification::Model> {
        let model = notification::Model {
            id: self.id_gen.generate(),
            user_id: notifiee_id.to_string(),
            notification_type,
            title: title.to_string(),
            message,
            is_read: false,
            related_id: related_id.map(ToString::to_string),
            related_type,
            action_user_id: action_user_id.map(ToString::to_string),
            created_at: Utc::now(),
        };

        self.notification_repo.create(model).await
    }

    /// Get notifications for a user, newest first.
    pub async fn get_notifications(
        &self,
        user_id: &str,
        limit: u64,
        until_id: Option<&str>,
        unread_only: bool,
    ) -> AppResult<Vec<notification::Model>> {
        self.notification_repo
            .find_by_user(user_id, limit, until_id, unread_only)
            .await
    }

    /// Mark a notification as read.
    ///
    /// Flipping a notification that belongs to someone else is a silent
    /// no-op.
    pub async fn mark_as_read(&self, user_id: &str, notification_id: &str) -> AppResult<()> {
        let notification = self.notification_repo.find_by_id(notification_id).await?;
        if let Some(n) = notification
            && n.user_id == user_id
        {
            self.notification_repo.mark_as_read(notification_id).await?;
        }
        Ok(())
    }

    /// Mark all notifications as read for a user.
    pub async fn mark_all_as_read(&self, user_id: &str) -> AppResult<u64> {
        self.notification_repo.mark_all_as_read(user_id).await
    }

    /// Count unread notifications for a user.
    pub async fn count_unread(&self, user_id: &str) -> AppResult<u64> {
        self.notification_repo.count_unread(user_id).await
    }

    /// Clear a user's inbox, returning how many notifications were removed.
    pub async fn clear(&self, user_id: &str) -> AppResult<u64> {
        self.notification_repo.delete_all_for_user(user_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_user(id: &str, name: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{id}@example.com"),
            password_hash: String::new(),
            avatar: None,
            bio: None,
            reputation: 0,
            is_moderator: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn test_question(id: &str, author_id: &str) -> question::Model {
        question::Model {
            id: id.to_string(),
            title: "How should I prepare for IIT JEE?".to_string(),
            content: "Looking for a weekly plan that balances all three subjects.".to_string(),
            author_id: author_id.to_string(),
            topic_id: None,
            tags: vec![],
            answer_count: 0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_answer_notification_message() {
        let service = NotificationService::new(NotificationRepository::new());
        let rahul = test_user("u2", "Rahul Kumar");
        let question = test_question("q1", "u1");

        let n = service
            .create_answer_notification("u1", &rahul, &question)
            .await
            .unwrap();

        assert_eq!(n.notification_type, NotificationType::Answer);
        assert!(n.message.contains("Rahul Kumar answered your question"));
        assert_eq!(n.related_id.as_deref(), Some("q1"));
        assert!(!n.is_read);
    }

    #[tokio::test]
    async fn test_unread_count_and_mark_all() {
        let service = NotificationService::new(NotificationRepository::new());
        let sarah = test_user("u3", "Sarah Johnson");

        service
            .create_follow_notification("u1", &sarah)
            .await
            .unwrap();
        service
            .create_upvote_notification("u1", "a1", RelatedType::Answer)
            .await
            .unwrap();

        assert_eq!(service.count_unread("u1").await.unwrap(), 2);
        assert_eq!(service.mark_all_as_read("u1").await.unwrap(), 2);
        assert_eq!(service.count_unread("u1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_mark_as_read_checks_ownership() {
        let service = NotificationService::new(NotificationRepository::new());
        let sarah = test_user("u3", "Sarah Johnson");

        let n = service
            .create_follow_notification("u1", &sarah)
            .await
            .unwrap();

        // Someone else marking it read is a no-op
        service.mark_as_read("u2", &n.id).await.unwrap();
        assert_eq!(service.count_unread("u1").await.unwrap(), 1);

        service.mark_as_read("u1", &n.id).await.unwrap();
        assert_eq!(service.count_unread("u1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clear_empties_inbox() {
        let service = NotificationService::new(NotificationRepository::new());
        let sarah = test_user("u3", "Sarah Johnson");

        service
            .create_follow_notification("u1", &sarah)
            .await
            .unwrap();
        service
            .create_follow_notification("u1", &sarah)
            .await
            .unwrap();

        assert_eq!(service.clear("u1").await.unwrap(), 2);
        assert!(
            service
                .get_notifications("u1", 10, None, false)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_listing_is_descending_by_id() {
        let service = NotificationService::new(NotificationRepository::new());
        let sarah = test_user("u3", "Sarah Johnson");
        let question = test_question("q1", "u1");

        service
            .create_follow_notification("u1", &sarah)
            .await
            .unwrap();
        service
            .create_answer_notification("u1", &sarah, &question)
            .await
            .unwrap();

        let list = service
            .get_notifications("u1", 10, None, false)
            .await
            .unwrap();
        assert_eq!(list.len(), 2);
        assert!(list[0].id > list[1].id);
        let types: Vec<_> = list.iter().map(|n| n.notification_type).collect();
        assert!(types.contains(&NotificationType::Answer));
        assert!(types.contains(&NotificationType::Follow));
    }
}
