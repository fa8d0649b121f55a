//! Comment repository.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use quaero_common::{AppError, AppResult};
use tokio::sync::RwLock;

use crate::entities::comment;

#[derive(Default)]
struct CommentTable {
    rows: BTreeMap<String, comment::Model>,
    /// `answer_id` → comment ids.
    by_answer: HashMap<String, BTreeSet<String>>,
}

/// Comment repository.
#[derive(Clone, Default)]
pub struct CommentRepository {
    table: Arc<RwLock<CommentTable>>,
}

impl CommentRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a comment by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<comment::Model>> {
        let table = self.table.read().await;
        Ok(table.rows.get(id).cloned())
    }

    /// Get a comment by ID, failing with `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> AppResult<comment::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment not found: {id}")))
    }

    /// Insert a new comment.
    pub async fn create(&self, model: comment::Model) -> AppResult<comment::Model> {
        let mut table = self.table.write().await;
        table
            .by_answer
            .entry(model.answer_id.clone())
            .or_default()
            .insert(model.id.clone());
        table.rows.insert(model.id.clone(), model.clone());
        Ok(model)
    }

    /// Replace a comment record.
    pub async fn update(&self, model: comment::Model) -> AppResult<comment::Model> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&model.id) {
            return Err(AppError::NotFound(format!(
                "Comment not found: {}",
                model.id
            )));
        }
        table.rows.insert(model.id.clone(), model.clone());
        Ok(model)
    }

    /// List comments on an answer, oldest first (conversation order).
    pub async fn find_by_answer(&self, answer_id: &str) -> AppResult<Vec<comment::Model>> {
        let table = self.table.read().await;
        Ok(table
            .by_answer
            .get(answer_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| table.rows.get(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Total number of comments.
    pub async fn count(&self) -> AppResult<u64> {
        let table = self.table.read().await;
        Ok(table.rows.len() as u64)
    }
}
