//! CLI argument parsing and command handling

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use crate::backend::MySqlProvider;
use crate::config::{ConnConfig, EnvMetadata, RunConfig, VERSION_ENV_VARS};
use crate::orchestrator::OrchestratorBuilder;
use crate::report;
use crate::retry::RetryPolicy;

/// conflict-bench - write-conflict latency benchmark for SQL backends
#[derive(Parser, Debug)]
#[command(name = "conflict-bench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Backend host address
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    pub host: String,

    /// Backend port
    #[arg(short = 'P', long, default_value_t = 4000)]
    pub port: u16,

    /// Database user
    #[arg(short, long, default_value = "root")]
    pub user: String,

    /// Database password
    #[arg(short, long, default_value = "")]
    pub password: String,

    /// Database name
    #[arg(short = 'D', long, default_value = "test")]
    pub database: String,

    /// Table the conflicting statement targets
    #[arg(short = 'T', long, default_value = "test")]
    pub table: String,

    /// Number of workers, each with one exclusive connection
    #[arg(short, long, default_value_t = 10)]
    pub workers: usize,

    /// Number of tasks to execute
    #[arg(short, long, default_value_t = 100)]
    pub tasks: usize,

    /// Cap statement attempts per task (default: retry until success)
    #[arg(long)]
    pub max_attempts: Option<usize>,

    /// Delay between retries in milliseconds (only with --max-attempts)
    #[arg(long, default_value_t = 0)]
    pub retry_backoff_ms: u64,

    /// Directory the report workbook is written to
    #[arg(long, default_value = ".")]
    pub output_dir: String,
}

impl Cli {
    /// Run the benchmark based on CLI arguments.
    pub async fn run(&self) -> Result<()> {
        let conn = ConnConfig {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
            table: self.table.clone(),
        };

        let retry = match self.max_attempts {
            Some(max_attempts) => RetryPolicy::limited(
                max_attempts,
                Duration::from_millis(self.retry_backoff_ms),
            ),
            None => RetryPolicy::Unbounded,
        };

        let config = RunConfig::new(self.workers, self.tasks, conn.statement()).with_retry(retry);
        let metadata = EnvMetadata::capture(VERSION_ENV_VARS);

        println!("=== test start ===");
        println!("statement is \"{}\"", config.statement);
        println!("task count is {}", config.tasks);
        println!("worker number is {}", config.workers);

        let provider = Arc::new(MySqlProvider::new(&conn));
        let orchestrator = OrchestratorBuilder::new()
            .config(config.clone())
            .provider(provider)
            .build()
            .context("failed to build orchestrator")?;

        let outcome = orchestrator.run().await?;

        let path = report::write_report(Path::new(&self.output_dir), &outcome, &config, &metadata)
            .with_context(|| format!("failed to write report to: {}", self.output_dir))?;
        tracing::info!(path = %path.display(), "report saved");

        println!("task time is {:.6}s", outcome.total.as_secs_f64());
        println!("report saved to {}", path.display());
        println!("=== test end ===");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["conflict-bench"]);
        assert_eq!(cli.host, "127.0.0.1");
        assert_eq!(cli.port, 4000);
        assert_eq!(cli.user, "root");
        assert_eq!(cli.password, "");
        assert_eq!(cli.database, "test");
        assert_eq!(cli.table, "test");
        assert_eq!(cli.workers, 10);
        assert_eq!(cli.tasks, 100);
        assert!(cli.max_attempts.is_none());
        assert_eq!(cli.output_dir, ".");
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "conflict-bench",
            "-H",
            "10.0.0.5",
            "-P",
            "3306",
            "-u",
            "bench",
            "-p",
            "secret",
            "-D",
            "benchdb",
            "-T",
            "counters",
            "-w",
            "32",
            "-t",
            "5000",
        ]);

        assert_eq!(cli.host, "10.0.0.5");
        assert_eq!(cli.port, 3306);
        assert_eq!(cli.user, "bench");
        assert_eq!(cli.password, "secret");
        assert_eq!(cli.database, "benchdb");
        assert_eq!(cli.table, "counters");
        assert_eq!(cli.workers, 32);
        assert_eq!(cli.tasks, 5000);
    }

    #[test]
    fn test_cli_bounded_retry() {
        let cli = Cli::parse_from([
            "conflict-bench",
            "--max-attempts",
            "50",
            "--retry-backoff-ms",
            "10",
        ]);
        assert_eq!(cli.max_attempts, Some(50));
        assert_eq!(cli.retry_backoff_ms, 10);
    }
}
