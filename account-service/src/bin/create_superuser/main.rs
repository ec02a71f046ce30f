use account_service::config::Config;
use account_service::domain::user::models::CreateUserCommand;
use account_service::domain::user::models::EmailAddress;
use account_service::domain::user::models::Password;
use account_service::domain::user::models::UserName;
use account_service::startup::build_authenticator;
use account_service::startup::build_user_service;
use account_service::startup::init_tracing;
use anyhow::bail;
use clap::Parser;

#[derive(Parser)]
#[command(name = "create-superuser", about = "Create a staff account with superuser rights")]
struct Cli {
    #[arg(long)]
    email: String,
    /// Omit to create an account that cannot log in with a password
    #[arg(long, env = "SUPERUSER_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    #[arg(long, default_value = "")]
    name: String,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::load()?;

    if config.database.url.is_none() {
        bail!("DATABASE__URL must be set: an in-memory superuser would be lost on exit");
    }

    let password = cli
        .password
        .map(|p| Password::new(p, config.validation.password_min_length))
        .transpose()?;
    let command = CreateUserCommand::new(
        EmailAddress::new(cli.email)?,
        UserName::new(cli.name)?,
        password,
    );

    let authenticator = build_authenticator(&config.auth);
    let user_service = build_user_service(&config.database, authenticator).await?;

    let user = user_service.create_superuser(command).await?;
    tracing::info!(
        user_id = %user.id,
        email = %user.email,
        "Superuser created"
    );

    Ok(())
}
