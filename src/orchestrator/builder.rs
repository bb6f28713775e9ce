//! Builder pattern for Orchestrator construction

use std::sync::Arc;

use crate::backend::BackendProvider;
use crate::config::RunConfig;
use crate::error::{BenchError, BenchResult};

use super::executor::Orchestrator;

/// Builder for creating an Orchestrator with validated configuration.
///
/// Queue and sink capacities default to the task count, which makes both
/// buffer invariants hold by construction. The overrides exist so tests can
/// exercise the underfill and sink-capacity failure paths.
///
/// # Example
///
/// ```ignore
/// let orchestrator = OrchestratorBuilder::new()
///     .config(RunConfig::new(10, 100, "update test set id=id+1"))
///     .provider(provider)
///     .build()?;
/// ```
pub struct OrchestratorBuilder {
    config: Option<RunConfig>,
    provider: Option<Arc<dyn BackendProvider>>,
    queue_capacity: Option<usize>,
    sink_capacity: Option<usize>,
}

impl OrchestratorBuilder {
    /// Create a new orchestrator builder.
    pub fn new() -> Self {
        Self {
            config: None,
            provider: None,
            queue_capacity: None,
            sink_capacity: None,
        }
    }

    /// Set the run configuration.
    pub fn config(mut self, config: RunConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the connection provider.
    pub fn provider(mut self, provider: Arc<dyn BackendProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Override the task queue capacity (defaults to the task count).
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    /// Override the result sink capacity (defaults to the task count).
    pub fn sink_capacity(mut self, capacity: usize) -> Self {
        self.sink_capacity = Some(capacity);
        self
    }

    /// Build the orchestrator.
    ///
    /// # Errors
    ///
    /// Returns an error if the config or provider is missing, or if the
    /// configuration fails validation.
    pub fn build(self) -> BenchResult<Orchestrator> {
        let config = self
            .config
            .ok_or_else(|| BenchError::missing_config("config"))?;

        let provider = self
            .provider
            .ok_or_else(|| BenchError::missing_config("provider"))?;

        config
            .validate()
            .map_err(|e| BenchError::config(e.to_string()))?;

        let queue_capacity = self.queue_capacity.unwrap_or(config.tasks);
        let sink_capacity = self.sink_capacity.unwrap_or(config.tasks);

        Ok(Orchestrator {
            config,
            provider,
            queue_capacity,
            sink_capacity,
        })
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
