//! Computes task analytics from a JSON export of tasks.
//!
//! Usage:
//!
//! ```text
//! taskboard_report <tasks-json> [config-toml]
//! ```
//!
//! The tasks file must hold a JSON array of tasks in the public task shape
//! (`title`, `status`, `priority`, `dueDate`, `owner`, `createdAt`, ...).
//! The tool loads them into an in-memory store, runs one escalation sweep
//! unless `maintenance.enabled` is false, and writes the resulting analytics
//! to stdout in both the dashboard and the legacy shape:
//!
//! ```json
//! {
//!   "computedAt": "2026-10-19T09:00:00Z",
//!   "sweep": { "examined": 12, "escalated": 2 },
//!   "analytics": { "total": 12, "done": 4, "...": "..." },
//!   "legacy": { "total": 12, "assigned": 9, "...": "..." }
//! }
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use mockable::DefaultClock;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use taskboard::analytics::{ADMIN_KEY, AnalyticsCache, AnalyticsEngine, LegacyStats};
use taskboard::config::{ConfigError, TrackerConfig};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    ports::{TaskRepository, TaskRepositoryError},
    services::{EscalationSweep, SweepOutcome},
};
use taskboard::telemetry::init_tracing;
use thiserror::Error;
use tokio::runtime::Builder;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while producing the report.
#[derive(Debug, Error)]
enum ReportError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("failed to read '{path}': {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tasks: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
    #[error("failed to write report: {0}")]
    Write(#[source] std::io::Error),
}

struct Args {
    tasks: Utf8PathBuf,
    config: Option<Utf8PathBuf>,
}

fn collect_args() -> Result<Args, ReportError> {
    let mut args = std::env::args().skip(1);
    let tasks = args.next().ok_or_else(|| {
        ReportError::InvalidArgs("usage: taskboard_report <tasks-json> [config-toml]".to_owned())
    })?;
    let config = args.next().map(Utf8PathBuf::from);
    if let Some(extra) = args.next() {
        return Err(ReportError::InvalidArgs(format!(
            "unexpected argument '{extra}'"
        )));
    }
    Ok(Args {
        tasks: Utf8PathBuf::from(tasks),
        config,
    })
}

/// Opens the directory containing `path` and returns it with the file name.
fn open_parent(path: &Utf8Path) -> Result<(Dir, Utf8PathBuf), ReportError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file = path
        .file_name()
        .ok_or_else(|| ReportError::InvalidArgs(format!("'{path}' is not a file path")))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|source| {
        ReportError::Read {
            path: parent.to_owned(),
            source,
        }
    })?;
    Ok((dir, Utf8PathBuf::from(file)))
}

fn load_config(path: Option<&Utf8Path>) -> Result<TrackerConfig, ReportError> {
    let Some(config_path) = path else {
        return Ok(TrackerConfig::default());
    };
    let (dir, file) = open_parent(config_path)?;
    Ok(TrackerConfig::load(&dir, &file)?)
}

fn load_tasks(path: &Utf8Path) -> Result<Vec<Task>, ReportError> {
    let (dir, file) = open_parent(path)?;
    let source = dir
        .read_to_string(&file)
        .map_err(|source| ReportError::Read {
            path: path.to_owned(),
            source,
        })?;
    Ok(serde_json::from_str(&source)?)
}

async fn build_report(
    config: &TrackerConfig,
    tasks: Vec<Task>,
) -> Result<serde_json::Value, ReportError> {
    let clock = Arc::new(DefaultClock);
    let policy = config.task_policy();
    let repository = Arc::new(InMemoryTaskRepository::new());
    for task in tasks {
        repository.save(task).await?;
    }

    let cache = Arc::new(AnalyticsCache::new(
        AnalyticsEngine::new(policy),
        Arc::clone(&clock),
    ));
    let sweep = EscalationSweep::new(
        Arc::clone(&repository),
        Arc::clone(&cache),
        Arc::clone(&clock),
        policy,
    );
    let outcome = if config.maintenance.enabled {
        sweep.run().await?
    } else {
        tracing::info!("maintenance disabled, skipping escalation sweep");
        SweepOutcome::default()
    };

    let all = repository.find_all().await?;
    let cached = cache.get_or_compute(ADMIN_KEY, &all);
    let legacy = LegacyStats::from(cached.report.as_ref());

    Ok(json!({
        "computedAt": cached.computed_at,
        "sweep": {
            "examined": outcome.examined,
            "escalated": outcome.escalated,
        },
        "analytics": cached.report.as_ref(),
        "legacy": legacy,
    }))
}

fn run() -> Result<(), ReportError> {
    let args = collect_args()?;
    let config = load_config(args.config.as_deref())?;
    init_tracing(&config.logging.filter);
    let tasks = load_tasks(&args.tasks)?;
    tracing::info!(path = %args.tasks, count = tasks.len(), "tasks loaded");

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(ReportError::RuntimeInit)?;
    let report = runtime.block_on(build_report(&config, tasks))?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report)
        .map_err(|err| ReportError::Write(std::io::Error::from(err)))?;
    writeln!(stdout).map_err(ReportError::Write)?;
    Ok(())
}

fn main() -> Result<(), BoxError> {
    run().map_err(BoxError::from)
}
