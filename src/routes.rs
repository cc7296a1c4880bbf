/// Route definitions and middleware setup
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{list_applications, login, me, register};
use crate::middleware::authenticate;
use crate::AppState;

/// Build the HTTP router.
///
/// The authentication stage is layered over every route. It never rejects a
/// request for lacking credentials, so `/register`, `/login` and `/health`
/// work unauthenticated; protected handlers opt in via the `CurrentUser`
/// extractor.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/me", get(me))
        .route("/api/v1/applications", get(list_applications))
        .route("/health", get(health_check))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
