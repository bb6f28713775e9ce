//! Run and connection configuration

use serde::{Deserialize, Serialize};

use crate::retry::RetryPolicy;

/// Environment variables captured as report labels.
///
/// These identify the cluster components under test. They are carried through
/// to the report verbatim and never influence execution.
pub const VERSION_ENV_VARS: &[&str] = &["TIDB_VERSION", "TIKV_VERSION", "PD_VERSION"];

/// Run configuration
///
/// Fixed for the run's duration: no task is added or removed and no worker is
/// started or stopped after the run begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of concurrent workers, each owning one exclusive connection
    pub workers: usize,

    /// Number of tasks pre-loaded into the queue
    pub tasks: usize,

    /// The write statement every task executes
    pub statement: String,

    /// Retry policy applied to each task
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl RunConfig {
    /// Create a config with the default retry policy (retry until success).
    pub fn new(workers: usize, tasks: usize, statement: impl Into<String>) -> Self {
        Self {
            workers,
            tasks,
            statement: statement.into(),
            retry: RetryPolicy::default(),
        }
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::InvalidWorkers(
                "worker count must be at least 1".into(),
            ));
        }

        if self.tasks == 0 {
            return Err(ConfigError::InvalidTasks(
                "task count must be at least 1".into(),
            ));
        }

        if self.statement.trim().is_empty() {
            return Err(ConfigError::EmptyStatement);
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("invalid worker count: {0}")]
    InvalidWorkers(String),

    /// Invalid task count
    #[error("invalid task count: {0}")]
    InvalidTasks(String),

    /// The statement is empty
    #[error("statement must not be empty")]
    EmptyStatement,
}

/// Backend connection parameters
///
/// Consumed only by connection provisioning; the core never sees these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnConfig {
    /// Backend host address
    pub host: String,
    /// Backend port
    pub port: u16,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Database name
    pub database: String,
    /// Table the conflict statement targets
    pub table: String,
}

impl ConnConfig {
    /// The conflicting write statement for the configured table.
    ///
    /// Every worker updates the same rows, so concurrent executions contend.
    pub fn statement(&self) -> String {
        format!("update {} set id=id+1", self.table)
    }
}

impl Default for ConnConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 4000,
            user: "root".into(),
            password: String::new(),
            database: "test".into(),
            table: "test".into(),
        }
    }
}

/// Opaque environment labels attached to the report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnvMetadata {
    labels: Vec<(String, String)>,
}

impl EnvMetadata {
    /// Capture the named environment variables, skipping unset or empty ones.
    pub fn capture(vars: &[&str]) -> Self {
        let labels = vars
            .iter()
            .filter_map(|name| {
                std::env::var(name)
                    .ok()
                    .filter(|value| !value.is_empty())
                    .map(|value| (name.to_string(), value))
            })
            .collect();
        Self { labels }
    }

    /// Build from explicit labels.
    pub fn from_labels(labels: Vec<(String, String)>) -> Self {
        Self { labels }
    }

    /// The captured labels in capture order.
    pub fn labels(&self) -> &[(String, String)] {
        &self.labels
    }

    /// Whether any label was captured.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
