//! Vote endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use quaero_common::AppResult;
use quaero_store::entities::notification::RelatedType;
use quaero_store::entities::vote::{self, TargetType, VoteType};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthUser, MaybeAuthUser},
    middleware::AppState,
};

/// Cast-vote request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub target_id: String,
    pub target_type: TargetType,
    #[serde(rename = "type")]
    pub vote_type: VoteType,
}

/// A recorded vote.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteView {
    pub id: String,
    pub user_id: String,
    pub target_id: String,
    pub target_type: String,
    #[serde(rename = "type")]
    pub vote_type: String,
}

impl From<vote::Model> for VoteView {
    fn from(v: vote::Model) -> Self {
        Self {
            id: v.id,
            user_id: v.user_id,
            target_id: v.target_id,
            target_type: v.target_type.as_str().to_string(),
            vote_type: v.vote_type.as_str().to_string(),
        }
    }
}

/// Vote-cast response: the caller's vote after the operation (absent when the
/// re-vote removed it) plus the target's new totals.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote: Option<VoteView>,
    pub upvotes: u64,
    pub downvotes: u64,
}

/// Vote-status query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteStatusQuery {
    /// Needed to look up the caller's own vote; totals aggregate across
    /// target types regardless.
    pub target_type: Option<TargetType>,
}

/// Cast, flip, or retract a vote.
async fn cast_vote(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<VoteRequest>,
) -> AppResult<Json<VoteResponse>> {
    let outcome = state
        .voting_service
        .vote(&user.id, &req.target_id, req.target_type, req.vote_type)
        .await?;

    // Notify the content author about a fresh upvote
    if let quaero_core::VoteOutcome::Recorded(vote) = &outcome
        && vote.vote_type == VoteType::Upvote
    {
        let related_type = match req.target_type {
            TargetType::Question => RelatedType::Question,
            TargetType::Answer => RelatedType::Answer,
        };
        match state
            .voting_service
            .target_author(&req.target_id, req.target_type)
            .await
        {
            Ok(author_id) => {
                if let Err(e) = state
                    .notification_service
                    .create_upvote_notification(&author_id, &req.target_id, related_type)
                    .await
                {
                    tracing::warn!(error = %e, "Failed to create upvote notification");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to resolve vote target author"),
        }
    }

    let counts = state.voting_service.get_vote_counts(&req.target_id).await?;
    let vote = match outcome {
        quaero_core::VoteOutcome::Recorded(v) => Some(v.into()),
        quaero_core::VoteOutcome::Removed => None,
    };

    Ok(Json(VoteResponse {
        vote,
        upvotes: counts.upvotes,
        downvotes: counts.downvotes,
    }))
}

/// Get a target's vote totals, plus the caller's own vote when authenticated
/// and a target type is given.
async fn vote_status(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Path(target_id): Path<String>,
    Query(query): Query<VoteStatusQuery>,
) -> AppResult<Json<VoteResponse>> {
    let counts = state.voting_service.get_vote_counts(&target_id).await?;

    let vote = match (user, query.target_type) {
        (Some(user), Some(target_type)) => state
            .voting_service
            .get_user_vote(&user.id, &target_id, target_type)
            .await?
            .map(Into::into),
        _ => None,
    };

    Ok(Json(VoteResponse {
        vote,
        upvotes: counts.upvotes,
        downvotes: counts.downvotes,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(cast_vote))
        .route("/{target_id}", get(vote_status))
}
