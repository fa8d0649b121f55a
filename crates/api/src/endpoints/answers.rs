//! Answer endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, post},
};
use quaero_common::AppResult;
use quaero_store::entities::{answer, comment};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::UserResponse};

/// Answer view with its author embedded.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    pub id: String,
    pub content: String,
    pub question_id: String,
    pub author_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserResponse>,
    pub is_accepted: bool,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl AnswerResponse {
    pub(crate) fn new(a: answer::Model, author: Option<UserResponse>) -> Self {
        Self {
            id: a.id,
            content: a.content,
            question_id: a.question_id,
            author_id: a.author_id,
            author,
            is_accepted: a.is_accepted,
            created_at: a.created_at.to_rfc3339(),
            updated_at: a.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Single-answer envelope.
#[derive(Serialize)]
pub struct AnswerEnvelope {
    pub answer: AnswerResponse,
}

/// Comment view.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub content: String,
    pub answer_id: String,
    pub author_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserResponse>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl CommentResponse {
    fn new(c: comment::Model, author: Option<UserResponse>) -> Self {
        Self {
            id: c.id,
            content: c.content,
            answer_id: c.answer_id,
            author_id: c.author_id,
            author,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Single-comment envelope.
#[derive(Serialize)]
pub struct CommentEnvelope {
    pub comment: CommentResponse,
}

/// Comment-list envelope.
#[derive(Serialize)]
pub struct CommentsResponse {
    pub comments: Vec<CommentResponse>,
}

/// Update-answer request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnswerRequest {
    pub content: String,
}

/// Create-comment request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
}

/// Edit an answer (author only).
async fn update_answer(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAnswerRequest>,
) -> AppResult<Json<AnswerEnvelope>> {
    let answer = state
        .answer_service
        .update(
            &user.id,
            &id,
            quaero_core::UpdateAnswerInput {
                content: req.content,
            },
        )
        .await?;

    Ok(Json(AnswerEnvelope {
        answer: AnswerResponse::new(answer, Some(user.into())),
    }))
}

/// Accept an answer (question author only).
async fn accept_answer(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<AnswerEnvelope>> {
    let answer = state.answer_service.accept(&user.id, &id).await?;
    let author = state
        .account_service
        .get(&answer.author_id)
        .await
        .ok()
        .map(Into::into);

    Ok(Json(AnswerEnvelope {
        answer: AnswerResponse::new(answer, author),
    }))
}

/// List an answer's comments, oldest first.
async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CommentsResponse>> {
    // Verify the answer exists so a bad id is a 404, not an empty list
    state.answer_service.get(&id).await?;

    let models = state.comment_service.list_by_answer(&id).await?;
    let mut comments = Vec::with_capacity(models.len());
    for model in models {
        let author = state
            .account_service
            .get(&model.author_id)
            .await
            .ok()
            .map(Into::into);
        comments.push(CommentResponse::new(model, author));
    }
    Ok(Json(CommentsResponse { comments }))
}

/// Comment on an answer.
async fn create_comment(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CreateCommentRequest>,
) -> AppResult<Json<CommentEnvelope>> {
    let answer = state.answer_service.get(&id).await?;

    let comment = state
        .comment_service
        .create(
            &user.id,
            quaero_core::CreateCommentInput {
                answer_id: id,
                content: req.content,
            },
        )
        .await?;

    // Notify the answer author (if not commenting on their own answer)
    if answer.author_id != user.id
        && let Err(e) = state
            .notification_service
            .create_comment_notification(&answer.author_id, &user, &answer.id)
            .await
    {
        tracing::warn!(error = %e, "Failed to create comment notification");
    }

    Ok(Json(CommentEnvelope {
        comment: CommentResponse::new(comment, Some(user.into())),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", patch(update_answer))
        .route("/{id}/accept", post(accept_answer))
        .route("/{id}/comments", get(list_comments).post(create_comment))
}
