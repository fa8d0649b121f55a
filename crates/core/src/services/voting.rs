//! Voting service.
//!
//! One toggle-or-replace state machine per `(user, target, target_type)`:
//! no vote → vote, same-direction re-vote → removed, opposite vote →
//! replaced in place. Reputation deltas to the content author are reversed
//! exactly when a vote is removed or flipped.

use chrono::Utc;
use quaero_common::{AppError, AppResult, IdGenerator};
use quaero_store::entities::vote::{self, TargetType, VoteType};
use quaero_store::repositories::{
    AnswerRepository, DynUserStore, QuestionRepository, UserStore, VoteCounts, VoteRepository,
};

/// What a vote call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// A vote now exists in the given direction (new or flipped).
    Recorded(vote::Model),
    /// The user's existing vote was removed (same-direction re-vote).
    Removed,
}

/// Voting service for business logic.
#[derive(Clone)]
pub struct VotingService {
    vote_repo: VoteRepository,
    question_repo: QuestionRepository,
    answer_repo: AnswerRepository,
    users: DynUserStore,
    id_gen: IdGenerator,
}

impl VotingService {
    /// Create a new voting service.
    #[must_use]
    pub fn new(
        vote_repo: VoteRepository,
        question_repo: QuestionRepository,
        answer_repo: AnswerRepository,
        users: DynUserStore,
    ) -> Self {
        Self {
            vote_repo,
            question_repo,
            answer_repo,
            users,
            id_gen: IdGenerator::new(),
        }
    }

    /// Cast, flip, or retract a vote.
    pub async fn vote(
        &self,
        user_id: &str,
        target_id: &str,
        target_type: TargetType,
        vote_type: VoteType,
    ) -> AppResult<VoteOutcome> {
        let author_id = self.target_author(target_id, target_type).await?;
        if author_id == user_id {
            return Err(AppError::BadRequest(
                "Cannot vote on your own content".to_string(),
            ));
        }

        let existing = self
            .vote_repo
            .find_by_user_and_target(user_id, target_id, target_type)
            .await?;

        match existing {
            None => {
                let model = vote::Model {
                    id: self.id_gen.generate(),
                    user_id: user_id.to_string(),
                    target_id: target_id.to_string(),
                    target_type,
                    vote_type,
                    created_at: Utc::now(),
                };
                let created = self.vote_repo.create(model).await?;
                self.users
                    .adjust_reputation(&author_id, vote_type.reputation_delta())
                    .await?;
                Ok(VoteOutcome::Recorded(created))
            }
            Some(vote) if vote.vote_type == vote_type => {
                self.vote_repo.delete(&vote.id).await?;
                self.users
                    .adjust_reputation(&author_id, -vote_type.reputation_delta())
                    .await?;
                Ok(VoteOutcome::Removed)
            }
            Some(vote) => {
                let flipped = self.vote_repo.set_vote_type(&vote.id, vote_type).await?;
                self.users
                    .adjust_reputation(
                        &author_id,
                        vote_type.reputation_delta() - vote.vote_type.reputation_delta(),
                    )
                    .await?;
                Ok(VoteOutcome::Recorded(flipped))
            }
        }
    }

    /// Get a user's current vote on a target, if any.
    pub async fn get_user_vote(
        &self,
        user_id: &str,
        target_id: &str,
        target_type: TargetType,
    ) -> AppResult<Option<vote::Model>> {
        self.vote_repo
            .find_by_user_and_target(user_id, target_id, target_type)
            .await
    }

    /// Aggregate vote totals for a target id.
    pub async fn get_vote_counts(&self, target_id: &str) -> AppResult<VoteCounts> {
        self.vote_repo.counts_for_target(target_id).await
    }

    /// Resolve the author of a vote target, verifying the target exists.
    pub async fn target_author(
        &self,
        target_id: &str,
        target_type: TargetType,
    ) -> AppResult<String> {
        match target_type {
            TargetType::Question => {
                Ok(self.question_repo.get_by_id(target_id).await?.author_id)
            }
            TargetType::Answer => Ok(self.answer_repo.get_by_id(target_id).await?.author_id),
        }
    }
}
