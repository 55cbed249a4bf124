use std::str::FromStr;
use std::sync::Arc;

use accounts_service::config::Config;
use accounts_service::domain::auth::service::AuthService;
use accounts_service::domain::user::service::UserService;
use accounts_service::inbound::http::router::create_router;
use accounts_service::outbound::repositories::user::PostgresUserRepository;
use anyhow::Context;
use auth::TokenCodec;
use chrono::Duration;
use jsonwebtoken::Algorithm;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "accounts_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "accounts-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_algorithm = %config.auth.algorithm,
        token_ttl_minutes = config.auth.token_ttl_minutes,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let algorithm = Algorithm::from_str(&config.auth.algorithm)
        .map_err(|e| anyhow::anyhow!("Invalid token algorithm {:?}: {}", config.auth.algorithm, e))?;
    let token_codec = Arc::new(
        TokenCodec::with_algorithm(config.auth.secret.as_bytes(), algorithm)
            .context("Token codec setup failed")?,
    );

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        token_codec,
        Duration::minutes(config.auth.token_ttl_minutes),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, auth_service);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
