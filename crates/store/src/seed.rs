//! Demo data seeding.
//!
//! Populates an empty store with the sample content the app ships for demos:
//! a few users (shared demo password), topics, a seeded question/answer pair,
//! sample notifications, and two pending reports.

use chrono::{Duration, Utc};
use quaero_common::{AppResult, IdGenerator};
use tracing::info;

use crate::entities::{
    answer, notification,
    notification::{NotificationType, RelatedType},
    question, report,
    report::{ReportReason, ReportStatus, ReportTargetType},
    topic,
};
use crate::repositories::{
    AnswerRepository, DynUserStore, NewUser, NotificationRepository, QuestionRepository,
    ReportRepository, TopicRepository, UserStore,
};

/// Password every seeded demo account accepts.
pub const DEMO_PASSWORD: &str = "Quaero123";

/// Seed the store with demo content. Intended for an empty store at startup.
pub async fn seed_demo(
    users: &DynUserStore,
    topics: &TopicRepository,
    questions: &QuestionRepository,
    answers: &AnswerRepository,
    notifications: &NotificationRepository,
    reports: &ReportRepository,
) -> AppResult<()> {
    let id_gen = IdGenerator::new();

    let priya = users
        .create(demo_user(
            "Priya Sharma",
            "priya@example.com",
            "Engineering student preparing for competitive exams",
            false,
        ))
        .await?;
    let rahul = users
        .create(demo_user(
            "Rahul Kumar",
            "rahul@example.com",
            "Software engineer and mentor",
            false,
        ))
        .await?;
    let sarah = users
        .create(demo_user(
            "Sarah Johnson",
            "sarah@example.com",
            "Startup founder",
            false,
        ))
        .await?;
    let moderator = users
        .create(demo_user(
            "Morgan Lee",
            "moderator@example.com",
            "Community moderator",
            true,
        ))
        .await?;

    let education = topics
        .create(demo_topic(&id_gen, "Education", "Exams, study plans, and learning", "🎓", "#2563eb"))
        .await?;
    let technology = topics
        .create(demo_topic(&id_gen, "Technology", "Software, hardware, and the industry", "💻", "#7c3aed"))
        .await?;
    topics
        .create(demo_topic(&id_gen, "Business", "Startups, careers, and markets", "📈", "#059669"))
        .await?;
    topics
        .create(demo_topic(&id_gen, "Science", "Research and how things work", "🔬", "#d97706"))
        .await?;

    let question = questions
        .create(question::Model {
            id: id_gen.generate(),
            title: "How should I structure my IIT JEE preparation?".to_string(),
            content: "I have two years before the exam and want a realistic weekly plan that \
                      balances physics, chemistry, and mathematics without burning out."
                .to_string(),
            author_id: priya.id.clone(),
            topic_id: Some(education.id.clone()),
            tags: vec!["exams".to_string(), "study-plan".to_string()],
            answer_count: 0,
            created_at: Utc::now() - Duration::days(2),
            updated_at: None,
        })
        .await?;
    topics.increment_question_count(&education.id).await?;

    let answer = answers
        .create(answer::Model {
            id: id_gen.generate(),
            content: "Anchor every week around one full mock test, then spend the next two days \
                      reworking only the problems you got wrong."
                .to_string(),
            question_id: question.id.clone(),
            author_id: rahul.id.clone(),
            is_accepted: false,
            created_at: Utc::now() - Duration::hours(20),
            updated_at: None,
        })
        .await?;
    questions.increment_answer_count(&question.id).await?;

    // Sample inbox for the first demo user
    notifications
        .create(notification::Model {
            id: id_gen.generate(),
            user_id: priya.id.clone(),
            notification_type: NotificationType::Answer,
            title: "New Answer".to_string(),
            message: "Rahul Kumar answered your question about IIT JEE preparation".to_string(),
            is_read: false,
            related_id: Some(question.id.clone()),
            related_type: Some(RelatedType::Question),
            action_user_id: Some(rahul.id.clone()),
            created_at: Utc::now() - Duration::minutes(30),
        })
        .await?;
    notifications
        .create(notification::Model {
            id: id_gen.generate(),
            user_id: priya.id.clone(),
            notification_type: NotificationType::Follow,
            title: "New Follower".to_string(),
            message: "Sarah Johnson started following you".to_string(),
            is_read: false,
            related_id: None,
            related_type: None,
            action_user_id: Some(sarah.id.clone()),
            created_at: Utc::now() - Duration::hours(2),
        })
        .await?;
    notifications
        .create(notification::Model {
            id: id_gen.generate(),
            user_id: priya.id.clone(),
            notification_type: NotificationType::Upvote,
            title: "Answer Upvoted".to_string(),
            message: "Your answer about startup advice received an upvote".to_string(),
            is_read: true,
            related_id: Some(answer.id.clone()),
            related_type: Some(RelatedType::Answer),
            action_user_id: None,
            created_at: Utc::now() - Duration::days(1),
        })
        .await?;

    // Two pending reports for the moderation queue
    reports
        .create(report::Model {
            id: id_gen.generate(),
            reporter_id: rahul.id.clone(),
            target_id: answer.id.clone(),
            target_type: ReportTargetType::Answer,
            reason: ReportReason::Inappropriate,
            description: "This answer contains offensive language and personal attacks."
                .to_string(),
            status: ReportStatus::Pending,
            moderator_notes: None,
            reviewed_at: None,
            reviewed_by: None,
            created_at: Utc::now() - Duration::hours(2),
        })
        .await?;
    reports
        .create(report::Model {
            id: id_gen.generate(),
            reporter_id: sarah.id.clone(),
            target_id: question.id.clone(),
            target_type: ReportTargetType::Question,
            reason: ReportReason::Spam,
            description: "This question appears to be promotional spam.".to_string(),
            status: ReportStatus::Pending,
            moderator_notes: None,
            reviewed_at: None,
            reviewed_by: None,
            created_at: Utc::now() - Duration::days(1),
        })
        .await?;

    info!(
        moderator = %moderator.email,
        technology = %technology.name,
        "Seeded demo content"
    );
    Ok(())
}

fn demo_user(name: &str, email: &str, bio: &str, is_moderator: bool) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
        password: DEMO_PASSWORD.to_string(),
        avatar: None,
        bio: Some(bio.to_string()),
        is_moderator,
    }
}

fn demo_topic(
    id_gen: &IdGenerator,
    name: &str,
    description: &str,
    icon: &str,
    color: &str,
) -> topic::Model {
    topic::Model {
        id: id_gen.generate(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
        question_count: 0,
        follower_count: 0,
        created_at: Utc::now(),
    }
}
