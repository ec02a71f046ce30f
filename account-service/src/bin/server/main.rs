use account_service::config::Config;
use account_service::inbound::http::router::create_router;
use account_service::startup::build_authenticator;
use account_service::startup::build_user_service;
use account_service::startup::init_tracing;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_tracing();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        database_configured = config.database.url.is_some(),
        password_min_length = config.validation.password_min_length,
        token_bytes = config.auth.token_bytes,
        "Configuration loaded"
    );

    let authenticator = build_authenticator(&config.auth);
    let user_service = build_user_service(&config.database, authenticator).await?;

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, config.validation);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
