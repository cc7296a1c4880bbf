/// JWT authentication middleware
///
/// Runs once per request, ahead of every handler. Establishes the
/// request-scoped authenticated identity when a valid bearer token is
/// presented; otherwise the request proceeds anonymous. Enforcement is left
/// to handlers via the `CurrentUser` extractor, so this stage never rejects
/// a request for lacking credentials.
use axum::{
    extract::{Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::AuthError;
use crate::models::Role;
use crate::AppState;

/// Authenticated identity for the current request.
///
/// Inserted into request extensions at most once per request and discarded
/// with it. Absence means the request is anonymous.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
}

/// Per-request authentication stage.
///
/// A missing header, a non-Bearer scheme, or a token that fails parsing or
/// signature checks leaves the request anonymous. A well-signed token naming
/// a user that no longer exists is a hard authentication failure: it is the
/// one condition this stage surfaces instead of swallowing.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(token) = bearer_token(&request) else {
        return Ok(next.run(request).await);
    };

    let subject = match state.tokens.extract_subject(&token) {
        Ok(subject) => subject,
        Err(_) => {
            tracing::debug!("Discarding unparseable bearer token");
            return Ok(next.run(request).await);
        }
    };

    // Re-running this stage on an already authenticated request is a no-op.
    if request.extensions().get::<CurrentUser>().is_none() {
        let user = state.users.find_by_username(&subject).await?;

        // The signature was already checked when the subject was extracted,
        // so a failure here only means the token is not valid for this user.
        let valid = state.tokens.validate(&token, &subject).unwrap_or(false);
        if valid {
            request.extensions_mut().insert(CurrentUser {
                user_id: user.id,
                username: user.username,
                role: user.role,
            });
        }
    }

    Ok(next.run(request).await)
}

/// Extract the raw token from an `Authorization: Bearer <token>` header.
/// The prefix match is exact and case-sensitive.
fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// FromRequestParts implementation for CurrentUser
///
/// The presence of the extension is the "is this request authenticated"
/// signal; handlers that require authentication take `CurrentUser` as an
/// argument and anonymous requests are rejected with 401 here.
#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::Unauthenticated)
    }
}
