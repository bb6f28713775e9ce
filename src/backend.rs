//! Backend abstraction and the MySQL-protocol implementation
//!
//! A [`Backend`] is one exclusive connection; `execute` takes `&mut self`, so
//! ownership alone guarantees no connection is ever shared between workers. A
//! [`BackendProvider`] provisions one connection per worker at run start.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::ConnectOptions;
use thiserror::Error;

use crate::config::ConnConfig;

/// Statement execution errors
#[derive(Debug, Error)]
pub enum ExecError {
    /// The connection could not be established
    #[error("failed to connect: {0}")]
    Connect(#[source] sqlx::Error),

    /// A statement attempt failed
    #[error("statement failed: {0}")]
    Statement(#[source] sqlx::Error),

    /// Backend-specific failure
    #[error("{0}")]
    Backend(String),
}

/// One exclusive backend connection.
#[async_trait]
pub trait Backend: Send {
    /// Execute one write statement on this connection.
    async fn execute(&mut self, statement: &str) -> Result<(), ExecError>;
}

/// Provisions exclusive connections, one per worker.
#[async_trait]
pub trait BackendProvider: Send + Sync {
    /// Backend identifier for logging.
    fn backend_name(&self) -> &str;

    /// Open a new exclusive connection.
    async fn provision(&self) -> Result<Box<dyn Backend>, ExecError>;
}

/// A single MySQL-protocol connection.
pub struct MySqlBackend {
    conn: MySqlConnection,
}

#[async_trait]
impl Backend for MySqlBackend {
    async fn execute(&mut self, statement: &str) -> Result<(), ExecError> {
        sqlx::query(statement)
            .execute(&mut self.conn)
            .await
            .map(|_| ())
            .map_err(ExecError::Statement)
    }
}

/// Provisions MySQL-protocol connections from a [`ConnConfig`].
#[derive(Debug, Clone)]
pub struct MySqlProvider {
    options: MySqlConnectOptions,
}

impl MySqlProvider {
    /// Build a provider for the configured address and credentials.
    pub fn new(config: &ConnConfig) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database)
            .charset("utf8");
        Self { options }
    }
}

#[async_trait]
impl BackendProvider for MySqlProvider {
    fn backend_name(&self) -> &str {
        "mysql"
    }

    async fn provision(&self) -> Result<Box<dyn Backend>, ExecError> {
        let conn = self
            .options
            .clone()
            .connect()
            .await
            .map_err(ExecError::Connect)?;
        Ok(Box::new(MySqlBackend { conn }))
    }
}
