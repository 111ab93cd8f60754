// Runtime configuration (flags or environment)

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::Path;
use std::time::Duration;
use usecase_core::application::ExecutorConfig;

pub const DEFAULT_DB_PATH: &str = "~/.usecase/usecase.db";
const MEMORY_DB: &str = ":memory:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Development: colored multi-line output
    Pretty,
    /// Production: JSON structured logging
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PublisherKind {
    /// In-process channel drained by a background consumer
    Channel,
    /// Structured `info` log lines (target `usecase::events`)
    Log,
}

#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// SQLite database path (`:memory:` for a throwaway database)
    #[arg(long, global = true, env = "USECASE_DB_PATH", default_value = DEFAULT_DB_PATH)]
    pub db_path: String,

    /// Log output format
    #[arg(long, global = true, env = "USECASE_LOG_FORMAT", value_enum, default_value = "pretty")]
    pub log_format: LogFormat,

    /// Deadline for the whole use case, in milliseconds
    #[arg(long, global = true, env = "USECASE_DEADLINE_MS")]
    pub deadline_ms: Option<u64>,

    /// Where domain events are published
    #[arg(long, global = true, env = "USECASE_PUBLISHER", value_enum, default_value = "channel")]
    pub publisher: PublisherKind,

    /// Delete the persisted entity when publishing fails
    #[arg(long, global = true, env = "USECASE_COMPENSATE")]
    pub compensate: bool,
}

impl Settings {
    /// sqlx connection URL; creates the parent directory of a file database
    pub fn database_url(&self) -> Result<String> {
        if self.db_path == MEMORY_DB {
            return Ok("sqlite::memory:".to_string());
        }

        let path = shellexpand::tilde(&self.db_path).into_owned();
        if let Some(parent) = Path::new(&path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        Ok(format!("sqlite://{}", path))
    }

    pub fn executor_config(&self) -> ExecutorConfig {
        match self.deadline_ms {
            Some(ms) => ExecutorConfig::default().with_deadline(Duration::from_millis(ms)),
            None => ExecutorConfig::default(),
        }
    }
}
