//! Business logic services.

pub mod account;
pub mod answer;
pub mod comment;
pub mod following;
pub mod moderation;
pub mod notification;
pub mod question;
pub mod topic;
pub mod voting;

pub use account::{AccountService, SignupInput, UpdateProfileInput};
pub use answer::{AnswerService, CreateAnswerInput, UpdateAnswerInput};
pub use comment::{CommentService, CreateCommentInput, UpdateCommentInput};
pub use following::FollowingService;
pub use moderation::{CreateReportInput, ModerationService, ReviewReportInput};
pub use notification::NotificationService;
pub use question::{CreateQuestionInput, QuestionService, UpdateQuestionInput};
pub use topic::TopicService;
pub use voting::{VoteOutcome, VotingService};
