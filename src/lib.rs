// Notes Auth Service Library

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;

pub use error::{AuthError, Result};
pub use models::User;

use std::sync::Arc;

use db::UserStore;
use security::TokenService;
use services::AuthService;

/// Shared application state, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub users: Arc<dyn UserStore>,
    pub tokens: Arc<TokenService>,
}
