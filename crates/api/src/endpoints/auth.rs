//! Authentication endpoints.

use axum::{Json, Router, extract::State, routing::get, routing::post};
use quaero_common::AppResult;
use quaero_store::entities::user;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{extractors::AuthUser, middleware::AppState};

/// Signup request. Field-level rules (password policy, name/email shape) are
/// enforced by the account service; this only rejects absurd payloads early.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 254))]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Login request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The authenticated user's own account view (includes email).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub reputation: i64,
    pub is_moderator: bool,
    pub created_at: String,
}

impl From<user::Model> for AccountResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            avatar: u.avatar,
            bio: u.bio,
            reputation: u.reputation,
            is_moderator: u.is_moderator,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// Session response: the account plus its bearer token.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: AccountResponse,
    pub token: String,
}

/// Create a new account.
async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<Json<SessionResponse>> {
    req.validate()?;

    let (user, token) = state
        .account_service
        .signup(quaero_core::SignupInput {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(SessionResponse {
        user: user.into(),
        token,
    }))
}

/// Sign in to an existing account.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<SessionResponse>> {
    let (user, token) = state.account_service.login(&req.email, &req.password).await?;

    Ok(Json(SessionResponse {
        user: user.into(),
        token,
    }))
}

/// Get the authenticated user's own account.
async fn me(AuthUser(user): AuthUser) -> Json<AccountResponse> {
    Json(user.into())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/me", get(me))
}
