//! Vote repository.
//!
//! The `(user, target, target_type)` keyed index makes the at-most-one-vote
//! invariant a property of the data structure instead of a convention.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use quaero_common::{AppError, AppResult};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::entities::vote::{self, TargetType, VoteType};

/// Aggregate vote totals for one target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoteCounts {
    pub upvotes: u64,
    pub downvotes: u64,
}

type VoteKey = (String, String, TargetType);

#[derive(Default)]
struct VoteTable {
    rows: HashMap<String, vote::Model>,
    /// `(user_id, target_id, target_type)` → vote id.
    by_key: HashMap<VoteKey, String>,
    /// `target_id` → vote ids. Keyed by target id alone: totals aggregate
    /// across target types, matching the counting behavior callers observe.
    by_target: HashMap<String, BTreeSet<String>>,
}

/// Vote repository.
#[derive(Clone, Default)]
pub struct VoteRepository {
    table: Arc<RwLock<VoteTable>>,
}

impl VoteRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a vote by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<vote::Model>> {
        let table = self.table.read().await;
        Ok(table.rows.get(id).cloned())
    }

    /// Find a user's vote on a target.
    pub async fn find_by_user_and_target(
        &self,
        user_id: &str,
        target_id: &str,
        target_type: TargetType,
    ) -> AppResult<Option<vote::Model>> {
        let table = self.table.read().await;
        let key = (user_id.to_string(), target_id.to_string(), target_type);
        Ok(table
            .by_key
            .get(&key)
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    /// Insert a new vote. Fails with `Conflict` if the user already voted on
    /// this target.
    pub async fn create(&self, model: vote::Model) -> AppResult<vote::Model> {
        let mut table = self.table.write().await;
        let key = (
            model.user_id.clone(),
            model.target_id.clone(),
            model.target_type,
        );

        if table.by_key.contains_key(&key) {
            return Err(AppError::Conflict(
                "Vote already recorded for this target".to_string(),
            ));
        }

        table.by_key.insert(key, model.id.clone());
        table
            .by_target
            .entry(model.target_id.clone())
            .or_default()
            .insert(model.id.clone());
        table.rows.insert(model.id.clone(), model.clone());
        Ok(model)
    }

    /// Delete a vote by ID.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let mut table = self.table.write().await;
        if let Some(vote) = table.rows.remove(id) {
            table.by_key.remove(&(
                vote.user_id.clone(),
                vote.target_id.clone(),
                vote.target_type,
            ));
            if let Some(ids) = table.by_target.get_mut(&vote.target_id) {
                ids.remove(id);
                if ids.is_empty() {
                    table.by_target.remove(&vote.target_id);
                }
            }
        }
        Ok(())
    }

    /// Flip an existing vote's direction in place.
    pub async fn set_vote_type(&self, id: &str, vote_type: VoteType) -> AppResult<vote::Model> {
        let mut table = self.table.write().await;
        let vote = table
            .rows
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Vote not found: {id}")))?;
        vote.vote_type = vote_type;
        Ok(vote.clone())
    }

    /// Aggregate vote totals for a target, independent of target type.
    pub async fn counts_for_target(&self, target_id: &str) -> AppResult<VoteCounts> {
        let table = self.table.read().await;
        let mut counts = VoteCounts::default();

        if let Some(ids) = table.by_target.get(target_id) {
            for id in ids {
                if let Some(vote) = table.rows.get(id) {
                    match vote.vote_type {
                        VoteType::Upvote => counts.upvotes += 1,
                        VoteType::Downvote => counts.downvotes += 1,
                    }
                }
            }
        }

        Ok(counts)
    }

    /// Total number of recorded votes.
    pub async fn count(&self) -> AppResult<u64> {
        let table = self.table.read().await;
        Ok(table.rows.len() as u64)
    }
}
