//! Follow endpoints.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{delete, get, post},
};
use quaero_common::AppResult;
use quaero_store::entities::follow::FollowingType;
use serde::{Deserialize, Serialize};

use crate::endpoints::users::FollowEdgeResponse;
use crate::{extractors::AuthUser, middleware::AppState};

/// Follow/unfollow request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    pub following_id: String,
    pub following_type: FollowingType,
}

/// Single-edge envelope.
#[derive(Serialize)]
pub struct FollowEnvelope {
    pub follow: FollowEdgeResponse,
}

/// Follow-check query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowCheckQuery {
    pub following_id: String,
    pub following_type: FollowingType,
}

/// Follow-check response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowCheckResponse {
    pub following: bool,
}

/// Followed-topics envelope.
#[derive(Serialize)]
pub struct FollowedTopicsResponse {
    pub follows: Vec<FollowEdgeResponse>,
}

/// Unfollow response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnfollowResponse {
    pub ok: bool,
}

/// Follow a user or topic.
async fn follow(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<FollowRequest>,
) -> AppResult<Json<FollowEnvelope>> {
    let edge = match req.following_type {
        FollowingType::User => {
            let edge = state
                .following_service
                .follow_user(&user.id, &req.following_id)
                .await?;

            // Notify the followee
            if let Err(e) = state
                .notification_service
                .create_follow_notification(&req.following_id, &user)
                .await
            {
                tracing::warn!(error = %e, "Failed to create follow notification");
            }
            edge
        }
        FollowingType::Topic => {
            state
                .following_service
                .follow_topic(&user.id, &req.following_id)
                .await?
        }
    };

    Ok(Json(FollowEnvelope {
        follow: edge.into(),
    }))
}

/// Unfollow a user or topic.
async fn unfollow(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<FollowRequest>,
) -> AppResult<Json<UnfollowResponse>> {
    match req.following_type {
        FollowingType::User => {
            state
                .following_service
                .unfollow_user(&user.id, &req.following_id)
                .await?;
        }
        FollowingType::Topic => {
            state
                .following_service
                .unfollow_topic(&user.id, &req.following_id)
                .await?;
        }
    }
    Ok(Json(UnfollowResponse { ok: true }))
}

/// Check whether the caller follows a user or topic.
async fn check(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<FollowCheckQuery>,
) -> AppResult<Json<FollowCheckResponse>> {
    let following = match query.following_type {
        FollowingType::User => {
            state
                .following_service
                .is_following_user(&user.id, &query.following_id)
                .await?
        }
        FollowingType::Topic => {
            state
                .following_service
                .is_following_topic(&user.id, &query.following_id)
                .await?
        }
    };
    Ok(Json(FollowCheckResponse { following }))
}

/// List the caller's followed topics.
async fn followed_topics(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<FollowedTopicsResponse>> {
    let edges = state.following_service.get_followed_topics(&user.id).await?;
    Ok(Json(FollowedTopicsResponse {
        follows: edges.into_iter().map(Into::into).collect(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(follow))
        .route("/", delete(unfollow))
        .route("/check", get(check))
        .route("/topics", get(followed_topics))
}
