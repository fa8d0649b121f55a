//! Following service.
//!
//! Two relations share one edge table: user→user and user→topic,
//! disambiguated by the edge's `following_type`. Edge uniqueness is enforced
//! by the repository's keyed index.

use chrono::Utc;
use quaero_common::{AppError, AppResult, IdGenerator};
use quaero_store::entities::follow::{self, FollowingType};
use quaero_store::repositories::{DynUserStore, FollowRepository, TopicRepository, UserStore};

/// Following service for business logic.
#[derive(Clone)]
pub struct FollowingService {
    follow_repo: FollowRepository,
    topic_repo: TopicRepository,
    users: DynUserStore,
    id_gen: IdGenerator,
}

impl FollowingService {
    /// Create a new following service.
    #[must_use]
    pub fn new(
        follow_repo: FollowRepository,
        topic_repo: TopicRepository,
        users: DynUserStore,
    ) -> Self {
        Self {
            follow_repo,
            topic_repo,
            users,
            id_gen: IdGenerator::new(),
        }
    }

    /// Follow a user.
    pub async fn follow_user(&self, follower_id: &str, followee_id: &str) -> AppResult<follow::Model> {
        if follower_id == followee_id {
            return Err(AppError::BadRequest("Cannot follow yourself".to_string()));
        }

        // Verify the followee exists
        self.users.get_by_id(followee_id).await?;

        let edge = self
            .follow_repo
            .create(self.new_edge(follower_id, followee_id, FollowingType::User))
            .await?;
        tracing::debug!(follower_id, followee_id, "User followed");
        Ok(edge)
    }

    /// Unfollow a user.
    pub async fn unfollow_user(&self, follower_id: &str, followee_id: &str) -> AppResult<()> {
        self.follow_repo
            .delete_by_key(follower_id, followee_id, FollowingType::User)
            .await
    }

    /// Follow a topic.
    pub async fn follow_topic(&self, follower_id: &str, topic_id: &str) -> AppResult<follow::Model> {
        // Verify the topic exists
        self.topic_repo.get_by_id(topic_id).await?;

        let edge = self
            .follow_repo
            .create(self.new_edge(follower_id, topic_id, FollowingType::Topic))
            .await?;
        self.topic_repo.increment_follower_count(topic_id).await?;
        Ok(edge)
    }

    /// Unfollow a topic.
    pub async fn unfollow_topic(&self, follower_id: &str, topic_id: &str) -> AppResult<()> {
        self.follow_repo
            .delete_by_key(follower_id, topic_id, FollowingType::Topic)
            .await?;
        self.topic_repo.decrement_follower_count(topic_id).await
    }

    /// Check if a user follows another user.
    pub async fn is_following_user(&self, follower_id: &str, followee_id: &str) -> AppResult<bool> {
        self.follow_repo
            .exists(follower_id, followee_id, FollowingType::User)
            .await
    }

    /// Check if a user follows a topic.
    pub async fn is_following_topic(&self, follower_id: &str, topic_id: &str) -> AppResult<bool> {
        self.follow_repo
            .exists(follower_id, topic_id, FollowingType::Topic)
            .await
    }

    /// Get the follow edges pointing at a user.
    pub async fn get_followers(&self, user_id: &str) -> AppResult<Vec<follow::Model>> {
        self.follow_repo.find_followers(user_id).await
    }

    /// Get a user's outgoing user-follow edges.
    pub async fn get_following(&self, user_id: &str) -> AppResult<Vec<follow::Model>> {
        self.follow_repo.find_following(user_id).await
    }

    /// Get a user's followed-topic edges.
    pub async fn get_followed_topics(&self, user_id: &str) -> AppResult<Vec<follow::Model>> {
        self.follow_repo.find_followed_topics(user_id).await
    }

    /// IDs of users following a topic.
    pub async fn topic_follower_ids(&self, topic_id: &str) -> AppResult<Vec<String>> {
        self.follow_repo.follower_ids(topic_id).await
    }

    fn new_edge(
        &self,
        follower_id: &str,
        following_id: &str,
        following_type: FollowingType,
    ) -> follow::Model {
        follow::Model {
            id: self.id_gen.generate(),
            follower_id: follower_id.to_string(),
            following_id: following_id.to_string(),
            following_type,
            created_at: Utc::now(),
        }
    }
}
