//! API middleware.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use quaero_core::{
    AccountService, AnswerService, CommentService, FollowingService, ModerationService,
    NotificationService, QuestionService, TopicService, VotingService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub question_service: QuestionService,
    pub answer_service: AnswerService,
    pub comment_service: CommentService,
    pub voting_service: VotingService,
    pub following_service: FollowingService,
    pub notification_service: NotificationService,
    pub moderation_service: ModerationService,
    pub topic_service: TopicService,
}

/// Authentication middleware.
///
/// Resolves `Authorization: Bearer <token>` to a user and stashes it in the
/// request extensions; handlers opt in through the `AuthUser` /
/// `MaybeAuthUser` extractors. An invalid token is treated the same as no
/// token.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        // Authenticate user by token; an invalid token is ignored
        if let Ok(user) = state.account_service.authenticate_by_token(token).await {
            req.extensions_mut().insert(user);
        }
    }

    next.run(req).await
}
