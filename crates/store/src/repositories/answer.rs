//! Answer repository.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use quaero_common::{AppError, AppResult};
use tokio::sync::RwLock;

use crate::entities::answer;

#[derive(Default)]
struct AnswerTable {
    /// Ordered by id; reverse iteration is newest-first.
    rows: BTreeMap<String, answer::Model>,
    /// `question_id` → answer ids.
    by_question: HashMap<String, BTreeSet<String>>,
}

/// Answer repository.
#[derive(Clone, Default)]
pub struct AnswerRepository {
    table: Arc<RwLock<AnswerTable>>,
}

impl AnswerRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find an answer by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<answer::Model>> {
        let table = self.table.read().await;
        Ok(table.rows.get(id).cloned())
    }

    /// Get an answer by ID, failing with `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> AppResult<answer::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Answer not found: {id}")))
    }

    /// Insert a new answer.
    pub async fn create(&self, model: answer::Model) -> AppResult<answer::Model> {
        let mut table = self.table.write().await;
        table
            .by_question
            .entry(model.question_id.clone())
            .or_default()
            .insert(model.id.clone());
        table.rows.insert(model.id.clone(), model.clone());
        Ok(model)
    }

    /// Replace an answer record.
    pub async fn update(&self, model: answer::Model) -> AppResult<answer::Model> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&model.id) {
            return Err(AppError::NotFound(format!("Answer not found: {}", model.id)));
        }
        table.rows.insert(model.id.clone(), model.clone());
        Ok(model)
    }

    /// List answers to a question: the accepted answer first, then newest
    /// first.
    pub async fn find_by_question(&self, question_id: &str) -> AppResult<Vec<answer::Model>> {
        let table = self.table.read().await;
        let Some(ids) = table.by_question.get(question_id) else {
            return Ok(Vec::new());
        };

        let mut answers: Vec<answer::Model> = ids
            .iter()
            .rev()
            .filter_map(|id| table.rows.get(id))
            .cloned()
            .collect();
        // Stable sort keeps the newest-first order within each group
        answers.sort_by_key(|a| !a.is_accepted);
        Ok(answers)
    }

    /// Mark one answer as accepted and clear the flag on its siblings.
    pub async fn mark_accepted(&self, question_id: &str, answer_id: &str) -> AppResult<answer::Model> {
        let mut table = self.table.write().await;

        let ids: Vec<String> = table
            .by_question
            .get(question_id)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default();

        if !ids.iter().any(|id| id == answer_id) {
            return Err(AppError::NotFound(format!("Answer not found: {answer_id}")));
        }

        for id in &ids {
            if let Some(answer) = table.rows.get_mut(id) {
                answer.is_accepted = id == answer_id;
            }
        }

        table
            .rows
            .get(answer_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Answer not found: {answer_id}")))
    }

    /// Total number of answers.
    pub async fn count(&self) -> AppResult<u64> {
        let table = self.table.read().await;
        Ok(table.rows.len() as u64)
    }
}
