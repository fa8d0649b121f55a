//! Notification repository.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use quaero_common::AppResult;
use tokio::sync::RwLock;

use crate::entities::notification;

#[derive(Default)]
struct NotificationTable {
    /// Ordered by id; ULIDs sort by creation time, so reverse iteration is
    /// newest-first.
    rows: BTreeMap<String, notification::Model>,
    /// `user_id` → notification ids.
    by_user: HashMap<String, BTreeSet<String>>,
}

/// Notification repository.
#[derive(Clone, Default)]
pub struct NotificationRepository {
    table: Arc<RwLock<NotificationTable>>,
}

impl NotificationRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a notification by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<notification::Model>> {
        let table = self.table.read().await;
        Ok(table.rows.get(id).cloned())
    }

    /// Insert a new notification.
    pub async fn create(&self, model: notification::Model) -> AppResult<notification::Model> {
        let mut table = self.table.write().await;
        table
            .by_user
            .entry(model.user_id.clone())
            .or_default()
            .insert(model.id.clone());
        table.rows.insert(model.id.clone(), model.clone());
        Ok(model)
    }

    /// Get notifications for a user, newest first.
    pub async fn find_by_user(
        &self,
        user_id: &str,
        limit: u64,
        until_id: Option<&str>,
        unread_only: bool,
    ) -> AppResult<Vec<notification::Model>> {
        let table = self.table.read().await;
        let Some(ids) = table.by_user.get(user_id) else {
            return Ok(Vec::new());
        };

        Ok(ids
            .iter()
            .rev()
            .filter(|id| until_id.is_none_or(|until| id.as_str() < until))
            .filter_map(|id| table.rows.get(id))
            .filter(|n| !unread_only || !n.is_read)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    /// Mark a notification as read.
    pub async fn mark_as_read(&self, id: &str) -> AppResult<()> {
        let mut table = self.table.write().await;
        if let Some(n) = table.rows.get_mut(id) {
            n.is_read = true;
        }
        Ok(())
    }

    /// Mark all of a user's notifications as read, returning how many were
    /// flipped.
    pub async fn mark_all_as_read(&self, user_id: &str) -> AppResult<u64> {
        let mut table = self.table.write().await;
        let ids: Vec<String> = table
            .by_user
            .get(user_id)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default();

        let mut flipped = 0;
        for id in ids {
            if let Some(n) = table.rows.get_mut(&id)
                && !n.is_read
            {
                n.is_read = true;
                flipped += 1;
            }
        }
        Ok(flipped)
    }

    /// Count unread notifications for a user.
    pub async fn count_unread(&self, user_id: &str) -> AppResult<u64> {
        let table = self.table.read().await;
        Ok(table
            .by_user
            .get(user_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| table.rows.get(id))
                    .filter(|n| !n.is_read)
                    .count() as u64
            })
            .unwrap_or(0))
    }

    /// Delete a notification.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let mut table = self.table.write().await;
        if let Some(n) = table.rows.remove(id) {
            if let Some(ids) = table.by_user.get_mut(&n.user_id) {
                ids.remove(id);
                if ids.is_empty() {
                    table.by_user.remove(&n.user_id);
                }
            }
        }
        Ok(())
    }

    /// Delete all notifications for a user, returning how many were removed.
    pub async fn delete_all_for_user(&self, user_id: &str) -> AppResult<u64> {
        let mut table = self.table.write().await;
        let Some(ids) = table.by_user.remove(user_id) else {
            return Ok(0);
        };

        let count = ids.len() as u64;
        for id in ids {
            table.rows.remove(&id);
        }
        Ok(count)
    }
}
