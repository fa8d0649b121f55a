//! Topic service.

use quaero_common::AppResult;
use quaero_store::entities::topic;
use quaero_store::repositories::TopicRepository;

/// Topic service for business logic.
#[derive(Clone)]
pub struct TopicService {
    topic_repo: TopicRepository,
}

impl TopicService {
    /// Create a new topic service.
    #[must_use]
    pub const fn new(topic_repo: TopicRepository) -> Self {
        Self { topic_repo }
    }

    /// List all topics.
    pub async fn list(&self) -> AppResult<Vec<topic::Model>> {
        self.topic_repo.list().await
    }

    /// Get a topic by ID.
    pub async fn get(&self, id: &str) -> AppResult<topic::Model> {
        self.topic_repo.get_by_id(id).await
    }
}
