//! Comment service.

use chrono::Utc;
use quaero_common::{AppError, AppResult, IdGenerator};
use quaero_store::entities::comment;
use quaero_store::repositories::{AnswerRepository, CommentRepository};

use crate::sanitize::sanitize_input;
use crate::validation::validate_comment;

/// Input for posting a comment.
#[derive(Debug, Clone)]
pub struct CreateCommentInput {
    pub answer_id: String,
    pub content: String,
}

/// Input for editing a comment.
#[derive(Debug, Clone)]
pub struct UpdateCommentInput {
    pub content: String,
}

/// Comment service for business logic.
#[derive(Clone)]
pub struct CommentService {
    comment_repo: CommentRepository,
    answer_repo: AnswerRepository,
    id_gen: IdGenerator,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub const fn new(comment_repo: CommentRepository, answer_repo: AnswerRepository) -> Self {
        Self {
            comment_repo,
            answer_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Post a comment on an answer.
    pub async fn create(
        &self,
        author_id: &str,
        input: CreateCommentInput,
    ) -> AppResult<comment::Model> {
        // Verify the answer exists
        self.answer_repo.get_by_id(&input.answer_id).await?;

        let content = sanitize_input(&input.content);
        validate_comment(&content).into_result()?;

        let model = comment::Model {
            id: self.id_gen.generate(),
            content,
            answer_id: input.answer_id,
            author_id: author_id.to_string(),
            created_at: Utc::now(),
            updated_at: None,
        };

        self.comment_repo.create(model).await
    }

    /// Edit a comment. Only the author may edit.
    pub async fn update(
        &self,
        user_id: &str,
        comment_id: &str,
        input: UpdateCommentInput,
    ) -> AppResult<comment::Model> {
        let mut model = self.comment_repo.get_by_id(comment_id).await?;

        if model.author_id != user_id {
            return Err(AppError::Forbidden(
                "Only the author can edit a comment".to_string(),
            ));
        }

        let content = sanitize_input(&input.content);
        validate_comment(&content).into_result()?;

        model.content = content;
        model.updated_at = Some(Utc::now());
        self.comment_repo.update(model).await
    }

    /// List comments on an answer, oldest first.
    pub async fn list_by_answer(&self, answer_id: &str) -> AppResult<Vec<comment::Model>> {
        self.comment_repo.find_by_answer(answer_id).await
    }
}
