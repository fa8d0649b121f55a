//! User endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch},
};
use quaero_common::AppResult;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::UserResponse};

/// Single-user envelope.
#[derive(Serialize)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

/// Follow-edge view.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowEdgeResponse {
    pub id: String,
    pub follower_id: String,
    pub following_id: String,
    pub following_type: String,
    pub created_at: String,
}

impl From<quaero_store::entities::follow::Model> for FollowEdgeResponse {
    fn from(f: quaero_store::entities::follow::Model) -> Self {
        Self {
            id: f.id,
            follower_id: f.follower_id,
            following_id: f.following_id,
            following_type: f.following_type.as_str().to_string(),
            created_at: f.created_at.to_rfc3339(),
        }
    }
}

/// Followers envelope.
#[derive(Serialize)]
pub struct FollowersResponse {
    pub followers: Vec<FollowEdgeResponse>,
}

/// Following envelope.
#[derive(Serialize)]
pub struct FollowingResponse {
    pub following: Vec<FollowEdgeResponse>,
}

/// Update-profile request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

/// Get a user's public profile.
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserEnvelope>> {
    let user = state.account_service.get(&id).await?;
    Ok(Json(UserEnvelope { user: user.into() }))
}

/// Update the authenticated user's profile.
async fn update_me(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserEnvelope>> {
    let updated = state
        .account_service
        .update_profile(
            &user.id,
            quaero_core::UpdateProfileInput {
                name: req.name,
                bio: req.bio,
                avatar: req.avatar,
            },
        )
        .await?;
    Ok(Json(UserEnvelope {
        user: updated.into(),
    }))
}

/// List a user's followers.
async fn followers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<FollowersResponse>> {
    let edges = state.following_service.get_followers(&id).await?;
    Ok(Json(FollowersResponse {
        followers: edges.into_iter().map(Into::into).collect(),
    }))
}

/// List the users a user follows.
async fn following(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<FollowingResponse>> {
    let edges = state.following_service.get_following(&id).await?;
    Ok(Json(FollowingResponse {
        following: edges.into_iter().map(Into::into).collect(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", patch(update_me))
        .route("/{id}", get(get_user))
        .route("/{id}/followers", get(followers))
        .route("/{id}/following", get(following))
}
