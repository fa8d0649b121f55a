//! In-memory repositories.
//!
//! Each repository owns its tables behind an `Arc<RwLock<_>>`, so clones share
//! state the way the upstream repository handles shared a connection pool.
//! Secondary indexes are maintained inside the same lock as the primary rows;
//! a single method call is therefore atomic.

mod answer;
mod comment;
mod follow;
mod notification;
mod question;
mod report;
mod topic;
mod user;
mod vote;

pub use answer::AnswerRepository;
pub use comment::CommentRepository;
pub use follow::FollowRepository;
pub use notification::NotificationRepository;
pub use question::QuestionRepository;
pub use report::ReportRepository;
pub use topic::TopicRepository;
pub use user::{DynUserStore, MemoryUserStore, NewUser, UserStore};
pub use vote::{VoteCounts, VoteRepository};
