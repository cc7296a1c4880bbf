/// Notes Auth Service - Main entry point
use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Duration;
use tokio::net::TcpListener;

use notes_auth::{
    config::Config,
    db::{InMemoryUserStore, UserStore},
    routes::build_router,
    security::{SigningKey, TokenService},
    services::AuthService,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!(
        "Starting Notes Auth Service on {}:{}",
        config.server_host,
        config.server_port
    );

    // Initialize the signing key. Without a configured secret the key is
    // ephemeral: a restart invalidates every outstanding token.
    let signing_key = match &config.jwt_secret {
        Some(secret) => SigningKey::from_base64(secret)?,
        None => {
            tracing::warn!("JWT_SECRET not set; generated an ephemeral signing key");
            SigningKey::generate()?
        }
    };

    let tokens = Arc::new(TokenService::new(
        &signing_key,
        Duration::seconds(config.token_ttl_secs),
    ));
    let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
    let auth = Arc::new(AuthService::new(users.clone(), tokens.clone()));

    let state = AppState { auth, users, tokens };

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("REST API listening on {}", addr);

    axum::serve(listener, build_router(state)).await?;

    Ok(())
}
