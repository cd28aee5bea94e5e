//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};

/// Development default values - NEVER use in production.
pub mod defaults {
    pub const DEV_HOST: &str = "127.0.0.1";
    pub const DEV_PORT: u16 = 4000;
    pub const DEV_CLIENT_ORIGIN: &str = "http://localhost:5173";
    pub const DEV_DEFAULT_ORG_ID: i64 = 1;

    pub const DEV_DB_HOST: &str = "localhost";
    pub const DEV_DB_PORT: u16 = 3306;
    pub const DEV_DB_USER: &str = "testbench";
    pub const DEV_DB_PASSWORD: &str = "testbench";
    pub const DB_NAME: &str = "testing_platform";
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Relational store connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    /// Never logged; `Debug` prints `[REDACTED]`.
    pub password: SecretString,
    pub name: String,
}

impl DatabaseSettings {
    /// Build a MySQL connection URL with percent-encoded credentials.
    pub fn url(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            urlencoding::encode(&self.user),
            urlencoding::encode(self.password.expose_secret()),
            self.host,
            self.port,
            self.name
        )
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Permitted cross-origin caller (the frontend)
    pub client_origin: String,
    /// Organization assigned to self-service accounts
    pub default_org_id: i64,
    /// Directory for built frontend assets (optional)
    pub static_dir: Option<PathBuf>,
    /// Store connection settings
    pub database: DatabaseSettings,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production) - REQUIRED
    /// - `API_HOST`: Server host (default: 127.0.0.1)
    /// - `API_PORT`: Server port (default: 4000)
    /// - `CLIENT_ORIGIN`: Allowed CORS origin (default: http://localhost:5173)
    /// - `DEFAULT_ORG_ID`: Organization for account creation (default: 1)
    /// - `STATIC_DIR`: Built frontend directory
    /// - `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`, each
    ///   falling back to its `VITE_DB_*` counterpart
    ///
    /// In production `DB_HOST`, `DB_USER` and `DB_PASSWORD` must be set and
    /// must not match the development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_str = lookup("RUST_ENV").ok_or(ConfigError::MissingEnvVar("RUST_ENV"))?;
        let environment = Environment::parse(&env_str).ok_or(ConfigError::InvalidValue(
            "RUST_ENV must be 'development' or 'production'",
        ))?;

        let set = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let db_var = |primary: &str, fallback: &str| set(primary).or_else(|| set(fallback));

        let host = lookup("API_HOST").unwrap_or_else(|| defaults::DEV_HOST.to_string());

        let port = match lookup("API_PORT") {
            Some(v) => v
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("API_PORT must be a valid port number"))?,
            None => defaults::DEV_PORT,
        };

        let client_origin =
            lookup("CLIENT_ORIGIN").unwrap_or_else(|| defaults::DEV_CLIENT_ORIGIN.to_string());

        let default_org_id = match lookup("DEFAULT_ORG_ID") {
            Some(v) => v
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidValue("DEFAULT_ORG_ID must be an integer"))?,
            None => defaults::DEV_DEFAULT_ORG_ID,
        };

        let static_dir = lookup("STATIC_DIR").map(PathBuf::from);

        let db_port = match db_var("DB_PORT", "VITE_DB_PORT") {
            Some(v) => v
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("DB_PORT must be a valid port number"))?,
            None => defaults::DEV_DB_PORT,
        };

        let required = |primary: &'static str, fallback: &str, dev: &str| {
            match db_var(primary, fallback) {
                Some(v) => Ok(v),
                None if environment.is_development() => Ok(dev.to_string()),
                None => Err(ConfigError::MissingEnvVar(primary)),
            }
        };

        let database = DatabaseSettings {
            host: required("DB_HOST", "VITE_DB_HOST", defaults::DEV_DB_HOST)?,
            port: db_port,
            user: required("DB_USER", "VITE_DB_USER", defaults::DEV_DB_USER)?,
            password: SecretString::from(required(
                "DB_PASSWORD",
                "VITE_DB_PASSWORD",
                defaults::DEV_DB_PASSWORD,
            )?),
            name: db_var("DB_NAME", "VITE_DB_NAME").unwrap_or_else(|| defaults::DB_NAME.to_string()),
        };

        let config = Config {
            environment,
            host,
            port,
            client_origin,
            default_org_id,
            static_dir,
            database,
        };

        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Validate that production configuration does not use development defaults.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database.user == defaults::DEV_DB_USER {
            errors.push(format!(
                "DB_USER is using development default '{}'. Set a production database user.",
                defaults::DEV_DB_USER
            ));
        }

        if self.database.password.expose_secret() == defaults::DEV_DB_PASSWORD {
            errors.push(
                "DB_PASSWORD is using development default. Set a production database password."
                    .to_string(),
            );
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    ProductionValidation(Vec<String>),
}
