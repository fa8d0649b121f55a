//! Question endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use quaero_common::AppResult;
use quaero_store::entities::question;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::endpoints::answers::AnswerResponse;
use crate::{extractors::AuthUser, middleware::AppState, response::UserResponse};

/// Question view with its author embedded.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<String>,
    pub tags: Vec<String>,
    pub answer_count: i64,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl QuestionResponse {
    fn new(q: question::Model, author: Option<UserResponse>) -> Self {
        Self {
            id: q.id,
            title: q.title,
            content: q.content,
            author_id: q.author_id,
            author,
            topic_id: q.topic_id,
            tags: q.tags,
            answer_count: q.answer_count,
            created_at: q.created_at.to_rfc3339(),
            updated_at: q.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Single-question envelope.
#[derive(Serialize)]
pub struct QuestionEnvelope {
    pub question: QuestionResponse,
}

/// Question-list envelope.
#[derive(Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<QuestionResponse>,
}

/// Answer-list envelope.
#[derive(Serialize)]
pub struct AnswersResponse {
    pub answers: Vec<AnswerResponse>,
}

/// List-questions query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuestionsQuery {
    /// Maximum results (default 50, hard-capped at 50).
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Cursor for pagination (before this ID).
    pub until_id: Option<String>,
    /// Only questions in this topic.
    pub topic_id: Option<String>,
    /// Only questions by this author.
    pub author_id: Option<String>,
    /// Substring search over titles and bodies.
    pub q: Option<String>,
}

const fn default_limit() -> u64 {
    50
}

/// Create-question request. Full length/tag rules are enforced by the
/// question service; this only rejects missing fields early.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, message = "Missing fields"))]
    pub title: String,

    #[validate(length(min = 1, message = "Missing fields"))]
    pub content: String,

    #[serde(default)]
    pub tags: Vec<String>,

    pub topic_id: Option<String>,
}

/// Update-question request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Create-answer request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnswerRequest {
    pub content: String,
}

async fn with_author(state: &AppState, q: question::Model) -> QuestionResponse {
    let author = state
        .account_service
        .get(&q.author_id)
        .await
        .ok()
        .map(Into::into);
    QuestionResponse::new(q, author)
}

/// List questions, newest first. Filters are mutually exclusive in effect:
/// search wins over topic, topic over author.
async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<ListQuestionsQuery>,
) -> AppResult<Json<QuestionsResponse>> {
    let models = if let Some(q) = &query.q {
        state.question_service.search(q, query.limit).await?
    } else if let Some(topic_id) = &query.topic_id {
        state
            .question_service
            .list_by_topic(topic_id, query.limit)
            .await?
    } else if let Some(author_id) = &query.author_id {
        state
            .question_service
            .list_by_author(author_id, query.limit)
            .await?
    } else {
        state
            .question_service
            .list(query.limit, query.until_id.as_deref())
            .await?
    };

    let mut questions = Vec::with_capacity(models.len());
    for model in models {
        questions.push(with_author(&state, model).await);
    }
    Ok(Json(QuestionsResponse { questions }))
}

/// Ask a question.
async fn create_question(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateQuestionRequest>,
) -> AppResult<Json<QuestionEnvelope>> {
    req.validate()?;

    let question = state
        .question_service
        .create(
            &user.id,
            quaero_core::CreateQuestionInput {
                title: req.title,
                content: req.content,
                tags: req.tags,
                topic_id: req.topic_id,
            },
        )
        .await?;

    // Notify the topic's followers about the new question
    if let Some(topic_id) = &question.topic_id {
        match state.topic_service.get(topic_id).await {
            Ok(topic) => {
                let follower_ids = state
                    .following_service
                    .topic_follower_ids(topic_id)
                    .await
                    .unwrap_or_default();
                for follower_id in follower_ids {
                    if follower_id == user.id {
                        continue;
                    }
                    if let Err(e) = state
                        .notification_service
                        .create_new_question_notification(
                            &follower_id,
                            &user,
                            &question,
                            &topic.name,
                        )
                        .await
                    {
                        tracing::warn!(error = %e, "Failed to create new-question notification");
                    }
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to load topic for notifications"),
        }
    }

    Ok(Json(QuestionEnvelope {
        question: QuestionResponse::new(question, Some(user.into())),
    }))
}

/// Get a question.
async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<QuestionEnvelope>> {
    let question = state.question_service.get(&id).await?;
    Ok(Json(QuestionEnvelope {
        question: with_author(&state, question).await,
    }))
}

/// Edit a question (author only).
async fn update_question(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateQuestionRequest>,
) -> AppResult<Json<QuestionEnvelope>> {
    let question = state
        .question_service
        .update(
            &user.id,
            &id,
            quaero_core::UpdateQuestionInput {
                title: req.title,
                content: req.content,
                tags: req.tags,
            },
        )
        .await?;

    Ok(Json(QuestionEnvelope {
        question: QuestionResponse::new(question, Some(user.into())),
    }))
}

/// List a question's answers: accepted first, then newest.
async fn list_answers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<AnswersResponse>> {
    // Verify the question exists so a bad id is a 404, not an empty list
    state.question_service.get(&id).await?;

    let models = state.answer_service.list_by_question(&id).await?;
    let mut answers = Vec::with_capacity(models.len());
    for model in models {
        let author = state
            .account_service
            .get(&model.author_id)
            .await
            .ok()
            .map(Into::into);
        answers.push(AnswerResponse::new(model, author));
    }
    Ok(Json(AnswersResponse { answers }))
}

/// Post an answer to a question.
async fn create_answer(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CreateAnswerRequest>,
) -> AppResult<Json<crate::endpoints::answers::AnswerEnvelope>> {
    let question = state.question_service.get(&id).await?;

    let answer = state
        .answer_service
        .create(
            &user.id,
            quaero_core::CreateAnswerInput {
                question_id: id,
                content: req.content,
            },
        )
        .await?;

    // Notify the question author (if not answering their own question)
    if question.author_id != user.id
        && let Err(e) = state
            .notification_service
            .create_answer_notification(&question.author_id, &user, &question)
            .await
    {
        tracing::warn!(error = %e, "Failed to create answer notification");
    }

    Ok(Json(crate::endpoints::answers::AnswerEnvelope {
        answer: AnswerResponse::new(answer, Some(user.into())),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_questions).post(create_question))
        .route("/{id}", get(get_question).patch(update_question))
        .route("/{id}/answers", get(list_answers).post(create_answer))
}
