//! Topic endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use quaero_common::AppResult;
use quaero_store::entities::topic;
use serde::Serialize;

use crate::middleware::AppState;

/// Topic view.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub question_count: i64,
    pub follower_count: i64,
}

impl From<topic::Model> for TopicResponse {
    fn from(t: topic::Model) -> Self {
        Self {
            id: t.id,
            name: t.name,
            description: t.description,
            icon: t.icon,
            color: t.color,
            question_count: t.question_count,
            follower_count: t.follower_count,
        }
    }
}

/// Topic-list envelope.
#[derive(Serialize)]
pub struct TopicsResponse {
    pub topics: Vec<TopicResponse>,
}

/// Single-topic envelope.
#[derive(Serialize)]
pub struct TopicEnvelope {
    pub topic: TopicResponse,
}

/// List all topics.
async fn list_topics(State(state): State<AppState>) -> AppResult<Json<TopicsResponse>> {
    let topics = state.topic_service.list().await?;
    Ok(Json(TopicsResponse {
        topics: topics.into_iter().map(Into::into).collect(),
    }))
}

/// Get a topic.
async fn get_topic(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<TopicEnvelope>> {
    let topic = state.topic_service.get(&id).await?;
    Ok(Json(TopicEnvelope {
        topic: topic.into(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_topics))
        .route("/{id}", get(get_topic))
}
