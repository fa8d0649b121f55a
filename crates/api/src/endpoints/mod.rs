//! API endpoints.

mod answers;
mod auth;
mod follows;
mod notifications;
mod questions;
mod reports;
mod topics;
mod users;
mod votes;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/questions", questions::router())
        .nest("/answers", answers::router())
        .nest("/votes", votes::router())
        .nest("/follows", follows::router())
        .nest("/notifications", notifications::router())
        .nest("/reports", reports::router())
        .nest("/admin/reports", reports::admin_router())
        .nest("/topics", topics::router())
}
