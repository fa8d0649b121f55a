//! Storage layer for quaero.
//!
//! All domain state lives in process-local, in-memory tables guarded by
//! `tokio::sync::RwLock`. Nothing survives a restart. Each entity has a
//! repository with the indexes its queries need, so uniqueness invariants
//! (one vote per user/target pair, one follow edge per relation) are enforced
//! by keyed maps rather than by convention.

pub mod entities;
pub mod repositories;
pub mod seed;

pub use repositories::{
    AnswerRepository, CommentRepository, DynUserStore, FollowRepository, MemoryUserStore,
    NewUser, NotificationRepository, QuestionRepository, ReportRepository, TopicRepository,
    UserStore, VoteCounts, VoteRepository,
};
