use std::sync::Arc;

use auth::Authenticator;
use auth::TokenGenerator;
use sqlx::postgres::PgPoolOptions;

use crate::config::AuthConfig;
use crate::config::DatabaseConfig;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::InMemoryUserRepository;
use crate::outbound::repositories::PostgresUserRepository;

/// Build the authenticator issuing tokens of the configured length.
pub fn build_authenticator(auth: &AuthConfig) -> Arc<Authenticator> {
    Arc::new(Authenticator::with_token_generator(
        TokenGenerator::with_byte_length(auth.token_bytes),
    ))
}

/// Build the user service over the configured store.
///
/// With a database URL this connects a pool and applies pending migrations;
/// without one, accounts are kept in process memory.
pub async fn build_user_service(
    database: &DatabaseConfig,
    authenticator: Arc<Authenticator>,
) -> Result<Arc<dyn UserServicePort>, anyhow::Error> {
    let Some(url) = database.url.as_deref() else {
        tracing::warn!(
            storage = "memory",
            "No database configured, accounts will not survive a restart"
        );
        let repository = Arc::new(InMemoryUserRepository::new());
        return Ok(Arc::new(UserService::new(repository, authenticator)));
    };

    let pg_pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .connect(url)
        .await?;
    tracing::info!(
        max_connections = database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let repository = Arc::new(PostgresUserRepository::new(pg_pool));
    Ok(Arc::new(UserService::new(repository, authenticator)))
}

/// Install the tracing subscriber shared by the binaries.
pub fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
