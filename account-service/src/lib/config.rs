use std::env;

use auth::TokenGenerator;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::user::models::Password;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string. Without one, accounts live in memory.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

/// Input rules applied at the HTTP boundary.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ValidationConfig {
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            password_min_length: default_password_min_length(),
        }
    }
}

fn default_password_min_length() -> usize {
    Password::DEFAULT_MIN_LENGTH
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct AuthConfig {
    /// Random bytes per issued token; the stored key is twice as long in hex.
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,
}

impl AuthConfig {
    pub const MIN_TOKEN_BYTES: usize = 16;
    /// `auth_tokens.key` holds at most 64 hex characters.
    pub const MAX_TOKEN_BYTES: usize = 32;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(Self::MIN_TOKEN_BYTES..=Self::MAX_TOKEN_BYTES).contains(&self.token_bytes) {
            return Err(ConfigError::Message(format!(
                "auth.token_bytes must be between {} and {}, got {}",
                Self::MIN_TOKEN_BYTES,
                Self::MAX_TOKEN_BYTES,
                self.token_bytes
            )));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_bytes: default_token_bytes(),
        }
    }
}

fn default_token_bytes() -> usize {
    TokenGenerator::DEFAULT_BYTE_LENGTH
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: VALIDATION__PASSWORD_MIN_LENGTH=8 overrides validation.password_min_length
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;

        let config: Self = configuration.try_deserialize()?;
        config.auth.validate()?;
        Ok(config)
    }
}
