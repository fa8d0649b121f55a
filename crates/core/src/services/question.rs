//! Question service.

use chrono::Utc;
use quaero_common::{AppError, AppResult, IdGenerator};
use quaero_store::entities::question;
use quaero_store::repositories::{QuestionRepository, TopicRepository};

use crate::sanitize::sanitize_input;
use crate::validation::validate_question;

/// Hard cap on listing sizes.
pub const MAX_LIST_LIMIT: u64 = 50;

/// Input for asking a question.
#[derive(Debug, Clone)]
pub struct CreateQuestionInput {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub topic_id: Option<String>,
}

/// Input for editing a question.
#[derive(Debug, Clone, Default)]
pub struct UpdateQuestionInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Question service for business logic.
#[derive(Clone)]
pub struct QuestionService {
    question_repo: QuestionRepository,
    topic_repo: TopicRepository,
    id_gen: IdGenerator,
}

impl QuestionService {
    /// Create a new question service.
    #[must_use]
    pub const fn new(question_repo: QuestionRepository, topic_repo: TopicRepository) -> Self {
        Self {
            question_repo,
            topic_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Ask a question.
    pub async fn create(
        &self,
        author_id: &str,
        input: CreateQuestionInput,
    ) -> AppResult<question::Model> {
        let title = sanitize_input(&input.title);
        let content = sanitize_input(&input.content);
        let tags = normalize_tags(&input.tags);

        validate_question(&title, &content, &tags).into_result()?;

        // Verify the topic exists before filing the question under it
        if let Some(topic_id) = &input.topic_id {
            self.topic_repo.get_by_id(topic_id).await?;
        }

        let model = question::Model {
            id: self.id_gen.generate(),
            title,
            content,
            author_id: author_id.to_string(),
            topic_id: input.topic_id.clone(),
            tags,
            answer_count: 0,
            created_at: Utc::now(),
            updated_at: None,
        };

        let created = self.question_repo.create(model).await?;
        if let Some(topic_id) = &input.topic_id {
            self.topic_repo.increment_question_count(topic_id).await?;
        }
        tracing::debug!(question_id = %created.id, author_id, "Question created");
        Ok(created)
    }

    /// Edit a question. Only the author may edit.
    pub async fn update(
        &self,
        user_id: &str,
        question_id: &str,
        input: UpdateQuestionInput,
    ) -> AppResult<question::Model> {
        let mut model = self.question_repo.get_by_id(question_id).await?;

        if model.author_id != user_id {
            return Err(AppError::Forbidden(
                "Only the author can edit a question".to_string(),
            ));
        }

        if let Some(title) = input.title {
            model.title = sanitize_input(&title);
        }
        if let Some(content) = input.content {
            model.content = sanitize_input(&content);
        }
        if let Some(tags) = input.tags {
            model.tags = normalize_tags(&tags);
        }

        validate_question(&model.title, &model.content, &model.tags).into_result()?;

        model.updated_at = Some(Utc::now());
        self.question_repo.update(model).await
    }

    /// Get a question by ID.
    pub async fn get(&self, id: &str) -> AppResult<question::Model> {
        self.question_repo.get_by_id(id).await
    }

    /// List questions newest-first, capped at [`MAX_LIST_LIMIT`].
    pub async fn list(&self, limit: u64, until_id: Option<&str>) -> AppResult<Vec<question::Model>> {
        self.question_repo
            .list(limit.min(MAX_LIST_LIMIT), until_id)
            .await
    }

    /// List questions in a topic.
    pub async fn list_by_topic(&self, topic_id: &str, limit: u64) -> AppResult<Vec<question::Model>> {
        self.question_repo
            .find_by_topic(topic_id, limit.min(MAX_LIST_LIMIT))
            .await
    }

    /// List questions asked by a user.
    pub async fn list_by_author(
        &self,
        author_id: &str,
        limit: u64,
    ) -> AppResult<Vec<question::Model>> {
        self.question_repo
            .find_by_author(author_id, limit.min(MAX_LIST_LIMIT))
            .await
    }

    /// Search question titles and bodies.
    pub async fn search(&self, query: &str, limit: u64) -> AppResult<Vec<question::Model>> {
        self.question_repo
            .search(query, limit.min(MAX_LIST_LIMIT))
            .await
    }
}

/// Trim tags, drop empties, and dedupe while preserving order.
fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !seen.iter().any(|s: &String| s == tag) {
            seen.push(tag.to_string());
        }
    }
    seen
}
