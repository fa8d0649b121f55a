//! Report endpoints: submission for everyone, review for moderators.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use quaero_common::{AppError, AppResult};
use quaero_store::entities::report::{self, ReportReason, ReportStatus, ReportTargetType};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState};

/// Submit-report request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportRequest {
    pub target_id: String,
    pub target_type: ReportTargetType,
    pub reason: ReportReason,
    pub description: String,
}

/// Review-report request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReportRequest {
    /// `resolved` or `dismissed`.
    pub status: ReportStatus,
    pub notes: Option<String>,
}

/// Report-list query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReportsQuery {
    /// Filter by status; omit for all reports.
    pub status: Option<ReportStatus>,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

const fn default_limit() -> u64 {
    50
}

/// Report view.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: String,
    pub reporter_id: String,
    pub target_id: String,
    pub target_type: String,
    pub reason: ReportReason,
    pub description: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moderator_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    pub created_at: String,
}

impl From<report::Model> for ReportResponse {
    fn from(r: report::Model) -> Self {
        Self {
            id: r.id,
            reporter_id: r.reporter_id,
            target_id: r.target_id,
            target_type: r.target_type.as_str().to_string(),
            reason: r.reason,
            description: r.description,
            status: r.status.as_str().to_string(),
            moderator_notes: r.moderator_notes,
            reviewed_at: r.reviewed_at.map(|t| t.to_rfc3339()),
            reviewed_by: r.reviewed_by,
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// Single-report envelope.
#[derive(Serialize)]
pub struct ReportEnvelope {
    pub report: ReportResponse,
}

/// Report-list envelope.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportsResponse {
    pub reports: Vec<ReportResponse>,
    pub pending_count: u64,
}

/// Report a piece of content.
async fn submit_report(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SubmitReportRequest>,
) -> AppResult<Json<ReportEnvelope>> {
    let report = state
        .moderation_service
        .submit_report(
            &user.id,
            quaero_core::CreateReportInput {
                target_id: req.target_id,
                target_type: req.target_type,
                reason: req.reason,
                description: req.description,
            },
        )
        .await?;

    Ok(Json(ReportEnvelope {
        report: report.into(),
    }))
}

/// List reports for the moderation queue (moderators only).
async fn list_reports(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListReportsQuery>,
) -> AppResult<Json<ReportsResponse>> {
    if !user.is_moderator {
        return Err(AppError::Forbidden(
            "Only moderators can list reports".to_string(),
        ));
    }

    let reports = state
        .moderation_service
        .get_reports(query.status, query.limit.min(50))
        .await?;
    let pending_count = state.moderation_service.count_pending().await?;

    Ok(Json(ReportsResponse {
        reports: reports.into_iter().map(Into::into).collect(),
        pending_count,
    }))
}

/// Review a pending report (moderators only; the service re-checks).
async fn review_report(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ReviewReportRequest>,
) -> AppResult<Json<ReportEnvelope>> {
    let report = state
        .moderation_service
        .review_report(
            &user.id,
            quaero_core::ReviewReportInput {
                report_id: id,
                status: req.status,
                notes: req.notes,
            },
        )
        .await?;

    Ok(Json(ReportEnvelope {
        report: report.into(),
    }))
}

/// Routes under `/reports` (any authenticated user).
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit_report))
}

/// Routes under `/admin/reports` (moderators).
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reports))
        .route("/{id}/review", post(review_report))
}
