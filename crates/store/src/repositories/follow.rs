//! Follow repository.
//!
//! The `(follower, following, type)` keyed index enforces edge uniqueness;
//! the per-side indexes answer follower/following queries without scanning
//! the whole table.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use quaero_common::{AppError, AppResult};
use tokio::sync::RwLock;

use crate::entities::follow::{self, FollowingType};

type FollowKey = (String, String, FollowingType);

#[derive(Default)]
struct FollowTable {
    rows: HashMap<String, follow::Model>,
    /// `(follower_id, following_id, following_type)` → edge id.
    by_key: HashMap<FollowKey, String>,
    /// `follower_id` → edge ids (what this user follows).
    by_follower: HashMap<String, BTreeSet<String>>,
    /// `following_id` → edge ids (who follows this subject).
    by_following: HashMap<String, BTreeSet<String>>,
}

/// Follow repository.
#[derive(Clone, Default)]
pub struct FollowRepository {
    table: Arc<RwLock<FollowTable>>,
}

impl FollowRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a follow edge exists.
    pub async fn exists(
        &self,
        follower_id: &str,
        following_id: &str,
        following_type: FollowingType,
    ) -> AppResult<bool> {
        let table = self.table.read().await;
        let key = (
            follower_id.to_string(),
            following_id.to_string(),
            following_type,
        );
        Ok(table.by_key.contains_key(&key))
    }

    /// Insert a new follow edge. Fails with `Conflict` if the edge already
    /// exists.
    pub async fn create(&self, model: follow::Model) -> AppResult<follow::Model> {
        let mut table = self.table.write().await;
        let key = (
            model.follower_id.clone(),
            model.following_id.clone(),
            model.following_type,
        );

        if table.by_key.contains_key(&key) {
            return Err(AppError::Conflict("Already following".to_string()));
        }

        table.by_key.insert(key, model.id.clone());
        table
            .by_follower
            .entry(model.follower_id.clone())
            .or_default()
            .insert(model.id.clone());
        table
            .by_following
            .entry(model.following_id.clone())
            .or_default()
            .insert(model.id.clone());
        table.rows.insert(model.id.clone(), model.clone());
        Ok(model)
    }

    /// Remove a follow edge. Fails with `BadRequest` if the edge does not
    /// exist.
    pub async fn delete_by_key(
        &self,
        follower_id: &str,
        following_id: &str,
        following_type: FollowingType,
    ) -> AppResult<()> {
        let mut table = self.table.write().await;
        let key = (
            follower_id.to_string(),
            following_id.to_string(),
            following_type,
        );

        let id = table
            .by_key
            .remove(&key)
            .ok_or_else(|| AppError::BadRequest("Not following".to_string()))?;

        table.rows.remove(&id);
        if let Some(ids) = table.by_follower.get_mut(follower_id) {
            ids.remove(&id);
            if ids.is_empty() {
                table.by_follower.remove(follower_id);
            }
        }
        if let Some(ids) = table.by_following.get_mut(following_id) {
            ids.remove(&id);
            if ids.is_empty() {
                table.by_following.remove(following_id);
            }
        }
        Ok(())
    }

    /// Edges pointing at a user (their followers), newest first.
    pub async fn find_followers(&self, user_id: &str) -> AppResult<Vec<follow::Model>> {
        let table = self.table.read().await;
        Ok(collect_desc(&table.rows, table.by_following.get(user_id))
            .into_iter()
            .filter(|f| f.following_type == FollowingType::User)
            .collect())
    }

    /// User-follow edges originating at a user (who they follow), newest
    /// first.
    pub async fn find_following(&self, follower_id: &str) -> AppResult<Vec<follow::Model>> {
        let table = self.table.read().await;
        Ok(collect_desc(&table.rows, table.by_follower.get(follower_id))
            .into_iter()
            .filter(|f| f.following_type == FollowingType::User)
            .collect())
    }

    /// Topic-follow edges originating at a user, newest first.
    pub async fn find_followed_topics(&self, follower_id: &str) -> AppResult<Vec<follow::Model>> {
        let table = self.table.read().await;
        Ok(collect_desc(&table.rows, table.by_follower.get(follower_id))
            .into_iter()
            .filter(|f| f.following_type == FollowingType::Topic)
            .collect())
    }

    /// IDs of users following a subject (user or topic).
    pub async fn follower_ids(&self, following_id: &str) -> AppResult<Vec<String>> {
        let table = self.table.read().await;
        Ok(collect_desc(&table.rows, table.by_following.get(following_id))
            .into_iter()
            .map(|f| f.follower_id)
            .collect())
    }

    /// Total number of edges.
    pub async fn count(&self) -> AppResult<u64> {
        let table = self.table.read().await;
        Ok(table.rows.len() as u64)
    }
}

fn collect_desc(
    rows: &HashMap<String, follow::Model>,
    ids: Option<&BTreeSet<String>>,
) -> Vec<follow::Model> {
    ids.map(|ids| {
        ids.iter()
            .rev()
            .filter_map(|id| rows.get(id))
            .cloned()
            .collect()
    })
    .unwrap_or_default()
}
