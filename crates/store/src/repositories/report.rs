//! Report repository.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use quaero_common::{AppError, AppResult};
use tokio::sync::RwLock;

use crate::entities::report::{self, ReportStatus, ReportTargetType};

#[derive(Default)]
struct ReportTable {
    /// Ordered by id; reverse iteration is newest-first.
    rows: BTreeMap<String, report::Model>,
    /// `(target_id, target_type)` → report ids.
    by_target: HashMap<(String, ReportTargetType), BTreeSet<String>>,
}

/// Report repository.
#[derive(Clone, Default)]
pub struct ReportRepository {
    table: Arc<RwLock<ReportTable>>,
}

impl ReportRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a report by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<report::Model>> {
        let table = self.table.read().await;
        Ok(table.rows.get(id).cloned())
    }

    /// Get a report by ID, failing with `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> AppResult<report::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report not found: {id}")))
    }

    /// Insert a new report.
    pub async fn create(&self, model: report::Model) -> AppResult<report::Model> {
        let mut table = self.table.write().await;
        table
            .by_target
            .entry((model.target_id.clone(), model.target_type))
            .or_default()
            .insert(model.id.clone());
        table.rows.insert(model.id.clone(), model.clone());
        Ok(model)
    }

    /// Replace a report record.
    pub async fn update(&self, model: report::Model) -> AppResult<report::Model> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&model.id) {
            return Err(AppError::NotFound(format!("Report not found: {}", model.id)));
        }
        table.rows.insert(model.id.clone(), model.clone());
        Ok(model)
    }

    /// Get reports filtered by status, newest first.
    pub async fn find_by_status(
        &self,
        status: Option<ReportStatus>,
        limit: u64,
    ) -> AppResult<Vec<report::Model>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .rev()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    /// Get reports against one target, newest first.
    pub async fn find_by_target(
        &self,
        target_id: &str,
        target_type: ReportTargetType,
    ) -> AppResult<Vec<report::Model>> {
        let table = self.table.read().await;
        Ok(table
            .by_target
            .get(&(target_id.to_string(), target_type))
            .map(|ids| {
                ids.iter()
                    .rev()
                    .filter_map(|id| table.rows.get(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Count pending reports.
    pub async fn count_pending(&self) -> AppResult<u64> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|r| r.status == ReportStatus::Pending)
            .count() as u64)
    }
}
