//! Notification endpoints.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{delete, get, post},
};
use quaero_common::AppResult;
use quaero_store::entities::notification::{self, RelatedType};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState};

/// List-notifications query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationsQuery {
    /// Maximum results (default: 20, max: 100).
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Cursor for pagination (before this ID).
    pub until_id: Option<String>,
    /// Only unread notifications.
    #[serde(default)]
    pub unread_only: bool,
}

const fn default_limit() -> u64 {
    20
}

/// Notification view.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_user_id: Option<String>,
    pub created_at: String,
}

impl From<notification::Model> for NotificationResponse {
    fn from(n: notification::Model) -> Self {
        Self {
            id: n.id,
            notification_type: n.notification_type.as_str().to_string(),
            title: n.title,
            message: n.message,
            is_read: n.is_read,
            related_id: n.related_id,
            related_type: n.related_type.map(|t| related_type_name(t).to_string()),
            action_user_id: n.action_user_id,
            created_at: n.created_at.to_rfc3339(),
        }
    }
}

const fn related_type_name(t: RelatedType) -> &'static str {
    match t {
        RelatedType::Question => "question",
        RelatedType::Answer => "answer",
        RelatedType::User => "user",
    }
}

/// Notification-list envelope.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsResponse {
    pub notifications: Vec<NotificationResponse>,
    pub unread_count: u64,
}

/// Mark-as-read request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAsReadRequest {
    pub notification_id: String,
}

/// Count response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResponse {
    pub count: u64,
}

/// Get the caller's notifications, newest first.
async fn list_notifications(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListNotificationsQuery>,
) -> AppResult<Json<NotificationsResponse>> {
    let limit = query.limit.min(100);
    let notifications = state
        .notification_service
        .get_notifications(&user.id, limit, query.until_id.as_deref(), query.unread_only)
        .await?;
    let unread_count = state.notification_service.count_unread(&user.id).await?;

    Ok(Json(NotificationsResponse {
        notifications: notifications.into_iter().map(Into::into).collect(),
        unread_count,
    }))
}

/// Mark one notification as read.
async fn mark_as_read(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<MarkAsReadRequest>,
) -> AppResult<Json<CountResponse>> {
    state
        .notification_service
        .mark_as_read(&user.id, &req.notification_id)
        .await?;
    let count = state.notification_service.count_unread(&user.id).await?;
    Ok(Json(CountResponse { count }))
}

/// Mark all of the caller's notifications as read.
async fn mark_all_as_read(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<CountResponse>> {
    let count = state.notification_service.mark_all_as_read(&user.id).await?;
    Ok(Json(CountResponse { count }))
}

/// Get the caller's unread notification count.
async fn unread_count(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<CountResponse>> {
    let count = state.notification_service.count_unread(&user.id).await?;
    Ok(Json(CountResponse { count }))
}

/// Clear the caller's inbox.
async fn clear_notifications(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<CountResponse>> {
    let count = state.notification_service.clear(&user.id).await?;
    Ok(Json(CountResponse { count }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/", delete(clear_notifications))
        .route("/mark-as-read", post(mark_as_read))
        .route("/mark-all-as-read", post(mark_all_as_read))
        .route("/unread-count", get(unread_count))
}
