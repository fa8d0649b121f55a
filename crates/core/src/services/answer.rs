//! Answer service.

use chrono::Utc;
use quaero_common::{AppError, AppResult, IdGenerator};
use quaero_store::entities::answer;
use quaero_store::repositories::{AnswerRepository, QuestionRepository};

use crate::sanitize::sanitize_input;
use crate::validation::validate_answer;

/// Input for posting an answer.
#[derive(Debug, Clone)]
pub struct CreateAnswerInput {
    pub question_id: String,
    pub content: String,
}

/// Input for editing an answer.
#[derive(Debug, Clone)]
pub struct UpdateAnswerInput {
    pub content: String,
}

/// Answer service for business logic.
#[derive(Clone)]
pub struct AnswerService {
    answer_repo: AnswerRepository,
    question_repo: QuestionRepository,
    id_gen: IdGenerator,
}

impl AnswerService {
    /// Create a new answer service.
    #[must_use]
    pub const fn new(answer_repo: AnswerRepository, question_repo: QuestionRepository) -> Self {
        Self {
            answer_repo,
            question_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Post an answer to a question.
    pub async fn create(&self, author_id: &str, input: CreateAnswerInput) -> AppResult<answer::Model> {
        // Verify the question exists
        self.question_repo.get_by_id(&input.question_id).await?;

        let content = sanitize_input(&input.content);
        validate_answer(&content).into_result()?;

        let model = answer::Model {
            id: self.id_gen.generate(),
            content,
            question_id: input.question_id.clone(),
            author_id: author_id.to_string(),
            is_accepted: false,
            created_at: Utc::now(),
            updated_at: None,
        };

        let created = self.answer_repo.create(model).await?;
        self.question_repo
            .increment_answer_count(&input.question_id)
            .await?;
        Ok(created)
    }

    /// Edit an answer. Only the author may edit.
    pub async fn update(
        &self,
        user_id: &str,
        answer_id: &str,
        input: UpdateAnswerInput,
    ) -> AppResult<answer::Model> {
        let mut model = self.answer_repo.get_by_id(answer_id).await?;

        if model.author_id != user_id {
            return Err(AppError::Forbidden(
                "Only the author can edit an answer".to_string(),
            ));
        }

        let content = sanitize_input(&input.content);
        validate_answer(&content).into_result()?;

        model.content = content;
        model.updated_at = Some(Utc::now());
        self.answer_repo.update(model).await
    }

    /// Accept an answer. Only the question's author may accept, and
    /// accepting one answer clears the flag on its siblings.
    pub async fn accept(&self, user_id: &str, answer_id: &str) -> AppResult<answer::Model> {
        let answer = self.answer_repo.get_by_id(answer_id).await?;
        let question = self.question_repo.get_by_id(&answer.question_id).await?;

        if question.author_id != user_id {
            return Err(AppError::Forbidden(
                "Only the question author can accept an answer".to_string(),
            ));
        }

        self.answer_repo
            .mark_accepted(&question.id, answer_id)
            .await
    }

    /// Get an answer by ID.
    pub async fn get(&self, id: &str) -> AppResult<answer::Model> {
        self.answer_repo.get_by_id(id).await
    }

    /// List answers to a question: accepted first, then newest first.
    pub async fn list_by_question(&self, question_id: &str) -> AppResult<Vec<answer::Model>> {
        self.answer_repo.find_by_question(question_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use quaero_store::entities::question;

    async fn fixture() -> (AnswerService, QuestionRepository) {
        let question_repo = QuestionRepository::new();
        let service = AnswerService::new(AnswerRepository::new(), question_repo.clone());
        (service, question_repo)
    }

    async fn seed_question(repo: &QuestionRepository, id: &str, author_id: &str) {
        repo.create(question::Model {
            id: id.to_string(),
            title: "A question title that is long enough".to_string(),
            content: "Content long enough to be a valid question body.".to_string(),
            author_id: author_id.to_string(),
            topic_id: None,
            tags: vec![],
            answer_count: 0,
            created_at: Utc::now(),
            updated_at: None,
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_create_bumps_answer_count() {
        let (service, questions) = fixture().await;
        seed_question(&questions, "q1", "asker").await;

        service
            .create(
                "author",
                CreateAnswerInput {
                    question_id: "q1".to_string(),
                    content: "A sufficiently long answer.".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(questions.get_by_id("q1").await.unwrap().answer_count, 1);
    }

    #[tokio::test]
    async fn test_create_on_missing_question_fails() {
        let (service, _) = fixture().await;
        let result = service
            .create(
                "author",
                CreateAnswerInput {
                    question_id: "missing".to_string(),
                    content: "A sufficiently long answer.".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_validates_content() {
        let (service, questions) = fixture().await;
        seed_question(&questions, "q1", "asker").await;

        let result = service
            .create(
                "author",
                CreateAnswerInput {
                    question_id: "q1".to_string(),
                    content: "short".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_accept_restricted_to_question_author() {
        let (service, questions) = fixture().await;
        seed_question(&questions, "q1", "asker").await;

        let answer = service
            .create(
                "author",
                CreateAnswerInput {
                    question_id: "q1".to_string(),
                    content: "A sufficiently long answer.".to_string(),
                },
            )
            .await
            .unwrap();

        let result = service.accept("author", &answer.id).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));

        let accepted = service.accept("asker", &answer.id).await.unwrap();
        assert!(accepted.is_accepted);
    }

    #[tokio::test]
    async fn test_accept_moves_to_new_answer() {
        let (service, questions) = fixture().await;
        seed_question(&questions, "q1", "asker").await;

        let first = service
            .create(
                "author1",
                CreateAnswerInput {
                    question_id: "q1".to_string(),
                    content: "The first long-enough answer.".to_string(),
                },
            )
            .await
            .unwrap();
        let second = service
            .create(
                "author2",
                CreateAnswerInput {
                    question_id: "q1".to_string(),
                    content: "The second long-enough answer.".to_string(),
                },
            )
            .await
            .unwrap();

        service.accept("asker", &first.id).await.unwrap();
        service.accept("asker", &second.id).await.unwrap();

        let answers = service.list_by_question("q1").await.unwrap();
        assert_eq!(answers[0].id, second.id);
        assert!(answers[0].is_accepted);
        assert!(!answers.iter().any(|a| a.id == first.id && a.is_accepted));
    }

    #[tokio::test]
    async fn test_only_author_can_edit() {
        let (service, questions) = fixture().await;
        seed_question(&questions, "q1", "asker").await;

        let answer = service
            .create(
                "author",
                CreateAnswerInput {
                    question_id: "q1".to_string(),
                    content: "A sufficiently long answer.".to_string(),
                },
            )
            .await
            .unwrap();

        let result = service
            .update(
                "someone-else",
                &answer.id,
                UpdateAnswerInput {
                    content: "A hijacked long-enough answer.".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
