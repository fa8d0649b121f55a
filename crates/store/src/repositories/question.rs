//! Question repository.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use quaero_common::{AppError, AppResult};
use tokio::sync::RwLock;

use crate::entities::question;

#[derive(Default)]
struct QuestionTable {
    /// Ordered by id; reverse iteration is newest-first.
    rows: BTreeMap<String, question::Model>,
    /// `author_id` → question ids.
    by_author: HashMap<String, BTreeSet<String>>,
    /// `topic_id` → question ids.
    by_topic: HashMap<String, BTreeSet<String>>,
}

/// Question repository.
#[derive(Clone, Default)]
pub struct QuestionRepository {
    table: Arc<RwLock<QuestionTable>>,
}

impl QuestionRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a question by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<question::Model>> {
        let table = self.table.read().await;
        Ok(table.rows.get(id).cloned())
    }

    /// Get a question by ID, failing with `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> AppResult<question::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question not found: {id}")))
    }

    /// Insert a new question.
    pub async fn create(&self, model: question::Model) -> AppResult<question::Model> {
        let mut table = self.table.write().await;
        table
            .by_author
            .entry(model.author_id.clone())
            .or_default()
            .insert(model.id.clone());
        if let Some(topic_id) = &model.topic_id {
            table
                .by_topic
                .entry(topic_id.clone())
                .or_default()
                .insert(model.id.clone());
        }
        table.rows.insert(model.id.clone(), model.clone());
        Ok(model)
    }

    /// Replace a question record. The author and topic never change after
    /// creation, so the indexes stay put.
    pub async fn update(&self, model: question::Model) -> AppResult<question::Model> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&model.id) {
            return Err(AppError::NotFound(format!(
                "Question not found: {}",
                model.id
            )));
        }
        table.rows.insert(model.id.clone(), model.clone());
        Ok(model)
    }

    /// List questions newest-first.
    pub async fn list(&self, limit: u64, until_id: Option<&str>) -> AppResult<Vec<question::Model>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .rev()
            .filter(|q| until_id.is_none_or(|until| q.id.as_str() < until))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    /// List questions filed under a topic, newest first.
    pub async fn find_by_topic(&self, topic_id: &str, limit: u64) -> AppResult<Vec<question::Model>> {
        let table = self.table.read().await;
        Ok(table
            .by_topic
            .get(topic_id)
            .map(|ids| {
                ids.iter()
                    .rev()
                    .filter_map(|id| table.rows.get(id))
                    .take(limit as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    /// List questions asked by a user, newest first.
    pub async fn find_by_author(
        &self,
        author_id: &str,
        limit: u64,
    ) -> AppResult<Vec<question::Model>> {
        let table = self.table.read().await;
        Ok(table
            .by_author
            .get(author_id)
            .map(|ids| {
                ids.iter()
                    .rev()
                    .filter_map(|id| table.rows.get(id))
                    .take(limit as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Case-insensitive substring search over titles and content, newest
    /// first.
    pub async fn search(&self, query: &str, limit: u64) -> AppResult<Vec<question::Model>> {
        let needle = query.to_lowercase();
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .rev()
            .filter(|q| {
                q.title.to_lowercase().contains(&needle)
                    || q.content.to_lowercase().contains(&needle)
            })
            .take(limit as usize)
            .cloned()
            .collect())
    }

    /// Bump a question's answer count.
    pub async fn increment_answer_count(&self, id: &str) -> AppResult<()> {
        let mut table = self.table.write().await;
        let question = table
            .rows
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Question not found: {id}")))?;
        question.answer_count += 1;
        Ok(())
    }

    /// Total number of questions.
    pub async fn count(&self) -> AppResult<u64> {
        let table = self.table.read().await;
        Ok(table.rows.len() as u64)
    }
}
