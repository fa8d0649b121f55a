//! Topic repository.

use std::collections::BTreeMap;
use std::sync::Arc;

use quaero_common::{AppError, AppResult};
use tokio::sync::RwLock;

use crate::entities::topic;

#[derive(Default)]
struct TopicTable {
    rows: BTreeMap<String, topic::Model>,
}

/// Topic repository.
#[derive(Clone, Default)]
pub struct TopicRepository {
    table: Arc<RwLock<TopicTable>>,
}

impl TopicRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a topic by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<topic::Model>> {
        let table = self.table.read().await;
        Ok(table.rows.get(id).cloned())
    }

    /// Get a topic by ID, failing with `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> AppResult<topic::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Topic not found: {id}")))
    }

    /// Insert a new topic.
    pub async fn create(&self, model: topic::Model) -> AppResult<topic::Model> {
        let mut table = self.table.write().await;
        table.rows.insert(model.id.clone(), model.clone());
        Ok(model)
    }

    /// List all topics in insertion order.
    pub async fn list(&self) -> AppResult<Vec<topic::Model>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    /// Bump a topic's question count.
    pub async fn increment_question_count(&self, id: &str) -> AppResult<()> {
        self.adjust(id, |t| t.question_count += 1).await
    }

    /// Bump a topic's follower count.
    pub async fn increment_follower_count(&self, id: &str) -> AppResult<()> {
        self.adjust(id, |t| t.follower_count += 1).await
    }

    /// Drop a topic's follower count.
    pub async fn decrement_follower_count(&self, id: &str) -> AppResult<()> {
        self.adjust(id, |t| t.follower_count = (t.follower_count - 1).max(0))
            .await
    }

    async fn adjust(&self, id: &str, f: impl FnOnce(&mut topic::Model)) -> AppResult<()> {
        let mut table = self.table.write().await;
        let topic = table
            .rows
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Topic not found: {id}")))?;
        f(topic);
        Ok(())
    }
}
