//! Moderation service for handling content reports.

use chrono::Utc;
use quaero_common::{AppError, AppResult, IdGenerator};
use quaero_store::entities::report::{self, ReportReason, ReportStatus, ReportTargetType};
use quaero_store::repositories::{DynUserStore, ReportRepository, UserStore};

use crate::sanitize::sanitize_input;

/// Maximum report description length.
const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Input for creating a report.
pub struct CreateReportInput {
    pub target_id: String,
    pub target_type: ReportTargetType,
    pub reason: ReportReason,
    pub description: String,
}

/// Input for reviewing a report.
pub struct ReviewReportInput {
    pub report_id: String,
    /// The terminal status: `Resolved` or `Dismissed`.
    pub status: ReportStatus,
    pub notes: Option<String>,
}

/// Moderation service for handling reports.
#[derive(Clone)]
pub struct ModerationService {
    report_repo: ReportRepository,
    users: DynUserStore,
    id_gen: IdGenerator,
}

impl ModerationService {
    /// Create a new moderation service.
    #[must_use]
    pub const fn new(report_repo: ReportRepository, users: DynUserStore) -> Self {
        Self {
            report_repo,
            users,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new report against a piece of content.
    pub async fn submit_report(
        &self,
        reporter_id: &str,
        input: CreateReportInput,
    ) -> AppResult<report::Model> {
        let description = sanitize_input(&input.description);
        if description.is_empty() {
            return Err(AppError::BadRequest(
                "Report description is required".to_string(),
            ));
        }
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(AppError::BadRequest(
                "Report description too long".to_string(),
            ));
        }

        let model = report::Model {
            id: self.id_gen.generate(),
            reporter_id: reporter_id.to_string(),
            target_id: input.target_id,
            target_type: input.target_type,
            reason: input.reason,
            description,
            status: ReportStatus::Pending,
            moderator_notes: None,
            reviewed_at: None,
            reviewed_by: None,
            created_at: Utc::now(),
        };

        let created = self.report_repo.create(model).await?;
        tracing::info!(report_id = %created.id, reporter_id, "Report submitted");
        Ok(created)
    }

    /// Review a pending report, transitioning it to `Resolved` or
    /// `Dismissed`. Both transitions are terminal.
    pub async fn review_report(
        &self,
        moderator_id: &str,
        input: ReviewReportInput,
    ) -> AppResult<report::Model> {
        let moderator = self.users.get_by_id(moderator_id).await?;
        if !moderator.is_moderator {
            return Err(AppError::Forbidden(
                "Only moderators can review reports".to_string(),
            ));
        }

        if input.status == ReportStatus::Pending {
            return Err(AppError::BadRequest(
                "Cannot set report back to pending".to_string(),
            ));
        }

        let mut model = self.report_repo.get_by_id(&input.report_id).await?;
        if model.status != ReportStatus::Pending {
            return Err(AppError::BadRequest(
                "Report already reviewed".to_string(),
            ));
        }

        model.status = input.status;
        model.moderator_notes = input.notes.map(|n| sanitize_input(&n));
        model.reviewed_at = Some(Utc::now());
        model.reviewed_by = Some(moderator_id.to_string());

        let updated = self.report_repo.update(model).await?;
        tracing::info!(
            report_id = %updated.id,
            status = updated.status.as_str(),
            moderator_id,
            "Report reviewed"
        );
        Ok(updated)
    }

    /// Get a report by ID.
    pub async fn get_report(&self, id: &str) -> AppResult<report::Model> {
        self.report_repo.get_by_id(id).await
    }

    /// Get pending reports, newest first.
    pub async fn get_pending_reports(&self, limit: u64) -> AppResult<Vec<report::Model>> {
        self.report_repo
            .find_by_status(Some(ReportStatus::Pending), limit)
            .await
    }

    /// Get reports filtered by status, newest first.
    pub async fn get_reports(
        &self,
        status: Option<ReportStatus>,
        limit: u64,
    ) -> AppResult<Vec<report::Model>> {
        self.report_repo.find_by_status(status, limit).await
    }

    /// Get reports against one target.
    pub async fn get_reports_by_target(
        &self,
        target_id: &str,
        target_type: ReportTargetType,
    ) -> AppResult<Vec<report::Model>> {
        self.report_repo.find_by_target(target_id, target_type).await
    }

    /// Count pending reports.
    pub async fn count_pending(&self) -> AppResult<u64> {
        self.report_repo.count_pending().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use quaero_store::repositories::{MemoryUserStore, NewUser, UserStore};
    use std::sync::Arc;

    async fn make_user(users: &DynUserStore, email: &str, is_moderator: bool) -> String {
        users
            .create(NewUser {
                name: "Test User".to_string(),
                email: email.to_string(),
                password: "Sup3rSecret".to_string(),
                avatar: None,
                bio: None,
                is_moderator,
            })
            .await
            .unwrap()
            .id
    }

    async fn fixture() -> (ModerationService, DynUserStore) {
        let users: DynUserStore = Arc::new(MemoryUserStore::new());
        let service = ModerationService::new(ReportRepository::new(), Arc::clone(&users));
        (service, users)
    }

    fn report_input() -> CreateReportInput {
        CreateReportInput {
            target_id: "a1".to_string(),
            target_type: ReportTargetType::Answer,
            reason: ReportReason::Inappropriate,
            description: "This answer contains personal attacks.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_creates_pending_report() {
        let (service, users) = fixture().await;
        let reporter = make_user(&users, "reporter@example.com", false).await;

        let report = service.submit_report(&reporter, report_input()).await.unwrap();
        assert_eq!(report.status, ReportStatus::Pending);
        assert!(report.reviewed_at.is_none());
        assert_eq!(service.count_pending().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_description_rejected() {
        let (service, users) = fixture().await;
        let reporter = make_user(&users, "reporter@example.com", false).await;

        let result = service
            .submit_report(
                &reporter,
                CreateReportInput {
                    description: "   ".to_string(),
                    ..report_input()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_review_transitions_once() {
        let (service, users) = fixture().await;
        let reporter = make_user(&users, "reporter@example.com", false).await;
        let moderator = make_user(&users, "mod@example.com", true).await;

        let report = service.submit_report(&reporter, report_input()).await.unwrap();

        let reviewed = service
            .review_report(
                &moderator,
                ReviewReportInput {
                    report_id: report.id.clone(),
                    status: ReportStatus::Resolved,
                    notes: Some("Content removed".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(reviewed.status, ReportStatus::Resolved);
        assert_eq!(reviewed.reviewed_by.as_deref(), Some(moderator.as_str()));
        assert!(reviewed.reviewed_at.is_some());
        assert_eq!(reviewed.moderator_notes.as_deref(), Some("Content removed"));

        // Terminal: a second review fails and changes nothing
        let result = service
            .review_report(
                &moderator,
                ReviewReportInput {
                    report_id: report.id.clone(),
                    status: ReportStatus::Dismissed,
                    notes: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(
            service.get_report(&report.id).await.unwrap().status,
            ReportStatus::Resolved
        );
    }

    #[tokio::test]
    async fn test_non_moderator_cannot_review() {
        let (service, users) = fixture().await;
        let reporter = make_user(&users, "reporter@example.com", false).await;
        let report = service.submit_report(&reporter, report_input()).await.unwrap();

        let result = service
            .review_report(
                &reporter,
                ReviewReportInput {
                    report_id: report.id,
                    status: ReportStatus::Dismissed,
                    notes: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_review_cannot_set_pending() {
        let (service, users) = fixture().await;
        let reporter = make_user(&users, "reporter@example.com", false).await;
        let moderator = make_user(&users, "mod@example.com", true).await;
        let report = service.submit_report(&reporter, report_input()).await.unwrap();

        let result = service
            .review_report(
                &moderator,
                ReviewReportInput {
                    report_id: report.id,
                    status: ReportStatus::Pending,
                    notes: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_reports_by_target() {
        let (service, users) = fixture().await;
        let reporter = make_user(&users, "reporter@example.com", false).await;

        service.submit_report(&reporter, report_input()).await.unwrap();
        service
            .submit_report(
                &reporter,
                CreateReportInput {
                    target_id: "q9".to_string(),
                    target_type: ReportTargetType::Question,
                    reason: ReportReason::Spam,
                    description: "Promotional spam.".to_string(),
                },
            )
            .await
            .unwrap();

        let for_answer = service
            .get_reports_by_target("a1", ReportTargetType::Answer)
            .await
            .unwrap();
        assert_eq!(for_answer.len(), 1);
        assert_eq!(for_answer[0].reason, ReportReason::Inappropriate);
    }
}
