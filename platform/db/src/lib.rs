//! Database primitives: connection settings, the shared pool and record access
//! for the HR tables.

pub mod departments;
pub mod employees;
pub mod sections;
pub mod users;

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use thiserror::Error;
use tracing::info;
use url::Url;

/// Shared connection pool handed to every request handler.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid database setting {key}: {value}")]
    InvalidSetting { key: &'static str, value: String },
    #[error(transparent)]
    Connect(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven connection settings.
///
/// `DATABASE_URL` wins when present; otherwise the URL is assembled from the
/// individual `DB_*` variables.
#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    url: Option<String>,
    host: String,
    port: u16,
    user: String,
    password: Option<String>,
    name: String,
    max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".into(),
            port: 5432,
            user: "postgres".into(),
            password: None,
            name: "HR-System".into(),
            max_connections: 10,
        }
    }
}

impl DatabaseSettings {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn from_env() -> DbResult<Self> {
        let defaults = Self::default();
        let port = match std::env::var("DB_PORT") {
            Ok(raw) => raw.trim().parse().map_err(|_| DbError::InvalidSetting {
                key: "DB_PORT",
                value: raw,
            })?,
            Err(_) => defaults.port,
        };
        let max_connections = match std::env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw.trim().parse().map_err(|_| DbError::InvalidSetting {
                key: "DB_MAX_CONNECTIONS",
                value: raw,
            })?,
            Err(_) => defaults.max_connections,
        };
        Ok(Self {
            url: std::env::var("DATABASE_URL").ok(),
            host: std::env::var("DB_HOST").unwrap_or(defaults.host),
            port,
            user: std::env::var("DB_USER").unwrap_or(defaults.user),
            password: std::env::var("DBPASS").ok(),
            name: std::env::var("DB_NAME").unwrap_or(defaults.name),
            max_connections,
        })
    }

    /// Connection URL. Credentials are percent-encoded, so passwords may
    /// contain URL delimiters.
    pub fn database_url(&self) -> DbResult<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }
        let invalid = |key: &'static str, value: &str| DbError::InvalidSetting {
            key,
            value: value.to_string(),
        };
        let mut url = Url::parse(&format!("postgres://{}:{}", self.host, self.port))
            .map_err(|_| invalid("DB_HOST", &self.host))?;
        url.set_username(&self.user)
            .map_err(|()| invalid("DB_USER", &self.user))?;
        if let Some(password) = &self.password {
            url.set_password(Some(password))
                .map_err(|()| invalid("DBPASS", "<redacted>"))?;
        }
        url.set_path(&self.name);
        Ok(url.into())
    }
}

/// Open the shared pool.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let mut options = ConnectOptions::new(settings.database_url()?);
    options
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);
    let pool = Database::connect(options).await?;
    info!(
        backend = ?pool.get_database_backend(),
        max_connections = settings.max_connections,
        "database pool ready"
    );
    Ok(pool)
}

/// Liveness check used by the health endpoint.
pub async fn ping(pool: &DbPool) -> bool {
    let backend = pool.get_database_backend();
    pool.execute(Statement::from_string(backend, "SELECT 1".to_string()))
        .await
        .is_ok()
}
