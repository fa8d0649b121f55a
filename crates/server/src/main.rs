//! Quaero server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware};
use quaero_api::{middleware::AppState, router as api_router};
use quaero_common::Config;
use quaero_core::{
    AccountService, AnswerService, CommentService, FollowingService, ModerationService,
    NotificationService, QuestionService, TopicService, VotingService,
};
use quaero_store::repositories::{
    AnswerRepository, CommentRepository, DynUserStore, FollowRepository, MemoryUserStore,
    NotificationRepository, QuestionRepository, ReportRepository, TopicRepository, VoteRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quaero=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting quaero server...");

    // Load configuration
    let config = Config::load()?;

    // Initialize the in-memory store. Everything here is process-local and
    // vanishes on shutdown.
    let users: DynUserStore = Arc::new(MemoryUserStore::new());
    let question_repo = QuestionRepository::new();
    let answer_repo = AnswerRepository::new();
    let comment_repo = CommentRepository::new();
    let vote_repo = VoteRepository::new();
    let follow_repo = FollowRepository::new();
    let notification_repo = NotificationRepository::new();
    let report_repo = ReportRepository::new();
    let topic_repo = TopicRepository::new();

    if config.seed_demo {
        info!("Seeding demo content...");
        quaero_store::seed::seed_demo(
            &users,
            &topic_repo,
            &question_repo,
            &answer_repo,
            &notification_repo,
            &report_repo,
        )
        .await?;
    }

    // Initialize services
    let account_service = AccountService::new(Arc::clone(&users), &config);
    let question_service = QuestionService::new(question_repo.clone(), topic_repo.clone());
    let answer_service = AnswerService::new(answer_repo.clone(), question_repo.clone());
    let comment_service = CommentService::new(comment_repo, answer_repo.clone());
    let voting_service = VotingService::new(
        vote_repo,
        question_repo,
        answer_repo,
        Arc::clone(&users),
    );
    let following_service =
        FollowingService::new(follow_repo, topic_repo.clone(), Arc::clone(&users));
    let notification_service = NotificationService::new(notification_repo);
    let moderation_service = ModerationService::new(report_repo, users);
    let topic_service = TopicService::new(topic_repo);

    // Create app state
    let state = AppState {
        account_service,
        question_service,
        answer_service,
        comment_service,
        voting_service,
        following_service,
        notification_service,
        moderation_service,
        topic_service,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            quaero_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
