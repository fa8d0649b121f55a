//! API integration tests.
//!
//! These drive the router end-to-end against a fresh in-memory store, so the
//! assertions cover real state transitions rather than mocked responses.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router, middleware,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use quaero_api::{AppState, router as api_router};
use quaero_common::{
    Config,
    config::{AuthConfig, PasswordPolicy, ServerConfig},
};
use quaero_core::{
    AccountService, AnswerService, CommentService, FollowingService, ModerationService,
    NotificationService, QuestionService, TopicService, VotingService,
};
use quaero_store::repositories::{
    AnswerRepository, CommentRepository, DynUserStore, FollowRepository, MemoryUserStore,
    NotificationRepository, QuestionRepository, ReportRepository, TopicRepository, UserStore,
    VoteRepository,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test configuration.
fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            url: "http://localhost:3000".to_string(),
        },
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            token_expiry_hours: 24,
            password_policy: PasswordPolicy::default(),
        },
        seed_demo: false,
    }
}

/// Create test app state over a fresh in-memory store, returning the user
/// store too so tests can do operator-level setup (e.g. granting the
/// moderator flag, which the public API deliberately does not expose).
fn create_test_env() -> (AppState, DynUserStore) {
    let config = create_test_config();

    let users: DynUserStore = Arc::new(MemoryUserStore::new());
    let question_repo = QuestionRepository::new();
    let answer_repo = AnswerRepository::new();
    let comment_repo = CommentRepository::new();
    let vote_repo = VoteRepository::new();
    let follow_repo = FollowRepository::new();
    let notification_repo = NotificationRepository::new();
    let report_repo = ReportRepository::new();
    let topic_repo = TopicRepository::new();

    let state = AppState {
        account_service: AccountService::new(Arc::clone(&users), &config),
        question_service: QuestionService::new(question_repo.clone(), topic_repo.clone()),
        answer_service: AnswerService::new(answer_repo.clone(), question_repo.clone()),
        comment_service: CommentService::new(comment_repo, answer_repo.clone()),
        voting_service: VotingService::new(
            vote_repo,
            question_repo,
            answer_repo,
            Arc::clone(&users),
        ),
        following_service: FollowingService::new(
            follow_repo,
            topic_repo.clone(),
            Arc::clone(&users),
        ),
        notification_service: NotificationService::new(notification_repo),
        moderation_service: ModerationService::new(report_repo, Arc::clone(&users)),
        topic_service: TopicService::new(topic_repo),
    };
    (state, users)
}

fn build_router(state: AppState) -> Router {
    api_router()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            quaero_api::middleware::auth_middleware,
        ))
        .with_state(state)
}

fn create_test_router() -> Router {
    let (state, _) = create_test_env();
    build_router(state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn signup(app: &Router, name: &str, email: &str) -> (String, String) {
    let (status, body) = send(
        app,
        "POST",
        "/auth/signup",
        None,
        Some(json!({"name": name, "email": email, "password": "Sup3rSecret"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "signup failed: {body}");
    (
        body["user"]["id"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}

async fn ask_question(app: &Router, token: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/questions",
        Some(token),
        Some(json!({
            "title": "How do I structure a Rust workspace?",
            "content": "I want separate crates for the API layer and the domain logic.",
            "tags": ["rust", "architecture"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create question failed: {body}");
    body["question"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_signup_login_me_roundtrip() {
    let app = create_test_router();
    let (user_id, _) = signup(&app, "Priya Sharma", "priya@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "priya@example.com", "password": "Sup3rSecret"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"].as_str().unwrap(), user_id);
    assert_eq!(body["email"].as_str().unwrap(), "priya@example.com");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app = create_test_router();
    signup(&app, "Priya Sharma", "priya@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "priya@example.com", "password": "WrongPass1"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"].as_str().unwrap(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_duplicate_signup_conflicts() {
    let app = create_test_router();
    signup(&app, "Priya Sharma", "priya@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/signup",
        None,
        Some(json!({
            "name": "Impostor",
            "email": "priya@example.com",
            "password": "Sup3rSecret"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"].as_str().unwrap(), "CONFLICT");
}

#[tokio::test]
async fn test_create_question_requires_auth() {
    let app = create_test_router();

    let (status, _) = send(
        &app,
        "POST",
        "/questions",
        None,
        Some(json!({
            "title": "A title long enough to pass",
            "content": "Content long enough to pass the validator easily.",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_question_validation_reports_field_errors() {
    let app = create_test_router();
    let (_, token) = signup(&app, "Priya Sharma", "priya@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/questions",
        Some(&token),
        Some(json!({
            "title": "short",
            "content": "This body is long enough to pass content validation.",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"].as_str().unwrap(), "VALIDATION_ERROR");
    let fields = body["error"]["fields"].as_array().unwrap();
    assert!(fields.iter().any(|f| f["field"] == "title"));
    assert!(fields.iter().all(|f| f["field"] != "content"));
}

#[tokio::test]
async fn test_question_list_and_get() {
    let app = create_test_router();
    let (user_id, token) = signup(&app, "Priya Sharma", "priya@example.com").await;
    let question_id = ask_question(&app, &token).await;

    let (status, body) = send(&app, "GET", "/questions", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0]["authorId"].as_str().unwrap(), user_id);
    assert_eq!(questions[0]["author"]["name"].as_str().unwrap(), "Priya Sharma");

    let (status, body) = send(&app, "GET", &format!("/questions/{question_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["id"].as_str().unwrap(), question_id);

    let (status, _) = send(&app, "GET", "/questions/missing", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_answer_flow_notifies_question_author() {
    let app = create_test_router();
    let (_, asker_token) = signup(&app, "Priya Sharma", "priya@example.com").await;
    let (_, rahul_token) = signup(&app, "Rahul Kumar", "rahul@example.com").await;
    let question_id = ask_question(&app, &asker_token).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/questions/{question_id}/answers"),
        Some(&rahul_token),
        Some(json!({"content": "Split by responsibility, not by type."})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create answer failed: {body}");
    assert_eq!(body["answer"]["questionId"].as_str().unwrap(), question_id);

    // Question author got an answer notification
    let (status, body) = send(&app, "GET", "/notifications", Some(&asker_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unreadCount"].as_u64().unwrap(), 1);
    let notifications = body["notifications"].as_array().unwrap();
    assert_eq!(notifications[0]["type"].as_str().unwrap(), "answer");
    assert!(
        notifications[0]["message"]
            .as_str()
            .unwrap()
            .contains("Rahul Kumar answered your question")
    );

    // Answer count was bumped
    let (_, body) = send(&app, "GET", &format!("/questions/{question_id}"), None, None).await;
    assert_eq!(body["question"]["answerCount"].as_i64().unwrap(), 1);
}

#[tokio::test]
async fn test_vote_toggle_and_flip_through_api() {
    let app = create_test_router();
    let (_, asker_token) = signup(&app, "Priya Sharma", "priya@example.com").await;
    let (_, voter_token) = signup(&app, "Rahul Kumar", "rahul@example.com").await;
    let question_id = ask_question(&app, &asker_token).await;

    let vote_body = json!({
        "targetId": question_id,
        "targetType": "question",
        "type": "upvote",
    });

    // Upvote
    let (status, body) = send(&app, "POST", "/votes", Some(&voter_token), Some(vote_body.clone())).await;
    assert_eq!(status, StatusCode::OK, "vote failed: {body}");
    assert_eq!(body["upvotes"].as_u64().unwrap(), 1);
    assert_eq!(body["vote"]["type"].as_str().unwrap(), "upvote");

    // Same-direction re-vote removes it
    let (_, body) = send(&app, "POST", "/votes", Some(&voter_token), Some(vote_body.clone())).await;
    assert_eq!(body["upvotes"].as_u64().unwrap(), 0);
    assert!(body["vote"].is_null());

    // Upvote then downvote leaves exactly one downvote
    let (_, _) = send(&app, "POST", "/votes", Some(&voter_token), Some(vote_body)).await;
    let (_, body) = send(
        &app,
        "POST",
        "/votes",
        Some(&voter_token),
        Some(json!({
            "targetId": question_id,
            "targetType": "question",
            "type": "downvote",
        })),
    )
    .await;
    assert_eq!(body["upvotes"].as_u64().unwrap(), 0);
    assert_eq!(body["downvotes"].as_u64().unwrap(), 1);
    assert_eq!(body["vote"]["type"].as_str().unwrap(), "downvote");

    // Status endpoint reflects the caller's vote
    let (status, body) = send(
        &app,
        "GET",
        &format!("/votes/{question_id}?targetType=question"),
        Some(&voter_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vote"]["type"].as_str().unwrap(), "downvote");
}

#[tokio::test]
async fn test_self_vote_rejected() {
    let app = create_test_router();
    let (_, token) = signup(&app, "Priya Sharma", "priya@example.com").await;
    let question_id = ask_question(&app, &token).await;

    let (status, _) = send(
        &app,
        "POST",
        "/votes",
        Some(&token),
        Some(json!({
            "targetId": question_id,
            "targetType": "question",
            "type": "upvote",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_follow_unfollow_and_notification() {
    let app = create_test_router();
    let (priya_id, priya_token) = signup(&app, "Priya Sharma", "priya@example.com").await;
    let (sarah_id, sarah_token) = signup(&app, "Sarah Johnson", "sarah@example.com").await;

    let follow_body = json!({"followingId": priya_id, "followingType": "user"});

    let (status, _) = send(&app, "POST", "/follows", Some(&sarah_token), Some(follow_body.clone())).await;
    assert_eq!(status, StatusCode::OK);

    // Duplicate follow conflicts
    let (status, _) = send(&app, "POST", "/follows", Some(&sarah_token), Some(follow_body.clone())).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Followee sees the follower and got notified
    let (_, body) = send(&app, "GET", &format!("/users/{priya_id}/followers"), None, None).await;
    let followers = body["followers"].as_array().unwrap();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0]["followerId"].as_str().unwrap(), sarah_id);

    let (_, body) = send(&app, "GET", "/notifications", Some(&priya_token), None).await;
    assert!(
        body["notifications"][0]["message"]
            .as_str()
            .unwrap()
            .contains("Sarah Johnson started following you")
    );

    // Unfollow leaves zero edges
    let (status, _) = send(&app, "DELETE", "/follows", Some(&sarah_token), Some(follow_body)).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "GET", &format!("/users/{priya_id}/followers"), None, None).await;
    assert!(body["followers"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_notification_mark_and_clear() {
    let app = create_test_router();
    let (priya_id, priya_token) = signup(&app, "Priya Sharma", "priya@example.com").await;
    let (_, sarah_token) = signup(&app, "Sarah Johnson", "sarah@example.com").await;
    let (_, rahul_token) = signup(&app, "Rahul Kumar", "rahul@example.com").await;

    for token in [&sarah_token, &rahul_token] {
        send(
            &app,
            "POST",
            "/follows",
            Some(token),
            Some(json!({"followingId": priya_id, "followingType": "user"})),
        )
        .await;
    }

    let (_, body) = send(&app, "GET", "/notifications/unread-count", Some(&priya_token), None).await;
    assert_eq!(body["count"].as_u64().unwrap(), 2);

    let (_, body) = send(&app, "GET", "/notifications", Some(&priya_token), None).await;
    let first_id = body["notifications"][0]["id"].as_str().unwrap().to_string();

    let (_, body) = send(
        &app,
        "POST",
        "/notifications/mark-as-read",
        Some(&priya_token),
        Some(json!({"notificationId": first_id})),
    )
    .await;
    assert_eq!(body["count"].as_u64().unwrap(), 1);

    let (_, body) = send(&app, "POST", "/notifications/mark-all-as-read", Some(&priya_token), None).await;
    assert_eq!(body["count"].as_u64().unwrap(), 1);

    let (_, body) = send(&app, "DELETE", "/notifications", Some(&priya_token), None).await;
    assert_eq!(body["count"].as_u64().unwrap(), 2);
    let (_, body) = send(&app, "GET", "/notifications", Some(&priya_token), None).await;
    assert!(body["notifications"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_report_lifecycle() {
    let app = create_test_router();
    let (_, asker_token) = signup(&app, "Priya Sharma", "priya@example.com").await;
    let (_, reporter_token) = signup(&app, "Sarah Johnson", "sarah@example.com").await;
    let question_id = ask_question(&app, &asker_token).await;

    // Submit a report
    let (status, body) = send(
        &app,
        "POST",
        "/reports",
        Some(&reporter_token),
        Some(json!({
            "targetId": question_id,
            "targetType": "question",
            "reason": "spam",
            "description": "This question appears to be promotional spam.",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "submit report failed: {body}");
    let report_id = body["report"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["report"]["status"].as_str().unwrap(), "pending");

    // Non-moderators cannot see the queue
    let (status, _) = send(&app, "GET", "/admin/reports", Some(&reporter_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // A fresh signup is not a moderator either, so reviewing is forbidden
    let (_, other_token) = signup(&app, "Morgan Lee", "morgan@example.com").await;
    let (status, _) = send(
        &app,
        "POST",
        &format!("/admin/reports/{report_id}/review"),
        Some(&other_token),
        Some(json!({"status": "resolved"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_report_review_by_moderator() {
    let (state, users) = create_test_env();
    let app = build_router(state.clone());

    let (_, asker_token) = signup(&app, "Priya Sharma", "priya@example.com").await;
    let (_, reporter_token) = signup(&app, "Sarah Johnson", "sarah@example.com").await;
    let question_id = ask_question(&app, &asker_token).await;

    let (_, body) = send(
        &app,
        "POST",
        "/reports",
        Some(&reporter_token),
        Some(json!({
            "targetId": question_id,
            "targetType": "question",
            "reason": "spam",
            "description": "Promotional spam.",
        })),
    )
    .await;
    let report_id = body["report"]["id"].as_str().unwrap().to_string();

    // Grant the moderator flag through the store, like an operator would,
    // and mint them a token
    let moderator = users
        .create(quaero_store::repositories::NewUser {
            name: "Morgan Lee".to_string(),
            email: "moderator@example.com".to_string(),
            password: "Sup3rSecret".to_string(),
            avatar: None,
            bio: None,
            is_moderator: true,
        })
        .await
        .unwrap();
    let mod_token = state.account_service.issue_token(&moderator.id).unwrap();

    // Moderator sees the pending queue
    let (status, body) = send(&app, "GET", "/admin/reports?status=pending", Some(&mod_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pendingCount"].as_u64().unwrap(), 1);
    assert_eq!(body["reports"].as_array().unwrap().len(), 1);

    // Resolve it
    let (status, body) = send(
        &app,
        "POST",
        &format!("/admin/reports/{report_id}/review"),
        Some(&mod_token),
        Some(json!({"status": "resolved", "notes": "Content removed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"]["status"].as_str().unwrap(), "resolved");
    assert_eq!(body["report"]["moderatorNotes"].as_str().unwrap(), "Content removed");

    // Terminal: a second review fails
    let (status, _) = send(
        &app,
        "POST",
        &format!("/admin/reports/{report_id}/review"),
        Some(&mod_token),
        Some(json!({"status": "dismissed"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_topics_listing() {
    let app = create_test_router();

    let (status, body) = send(&app, "GET", "/topics", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["topics"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_endpoint_returns_404() {
    let app = create_test_router();

    let (status, _) = send(&app, "GET", "/nonexistent/endpoint", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
