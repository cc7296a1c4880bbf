use std::sync::Arc;

use crate::db::UserStore;
use crate::error::{AuthError, Result};
use crate::models::User;
use crate::security::{password, TokenService};

/// Registration and credential verification.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Register a new account.
    ///
    /// The raw password is hashed before it reaches the store; the hash never
    /// travels back to callers in responses.
    pub async fn register(&self, username: &str, raw_password: &str) -> Result<User> {
        let password_hash = password::hash_password(raw_password)?;
        let user = self
            .users
            .insert(User::new(username.to_string(), password_hash))
            .await?;

        tracing::info!("User registered: {}", user.username);
        Ok(user)
    }

    /// Verify a username/password pair and issue a token on success.
    ///
    /// Unknown user and wrong password collapse into the same
    /// `InvalidCredentials` result; callers cannot tell which factor failed.
    pub async fn login(&self, username: &str, raw_password: &str) -> Result<String> {
        // Only a missing record collapses into the generic credential
        // failure; a store that cannot answer at all is an internal error.
        let user = match self.users.find_by_username(username).await {
            Ok(user) => user,
            Err(AuthError::UserNotFound) => return Err(AuthError::InvalidCredentials),
            Err(err) => return Err(err),
        };

        password::verify_password(raw_password, &user.password_hash)?;

        let token = self.tokens.issue(&user.username)?;

        tracing::info!("User logged in: {}", user.username);
        Ok(token)
    }
}
