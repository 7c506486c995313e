use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingConfig, ResolvedOutputs};

/// Keeps the background writer alive; dropping it flushes `telemetry.jsonl`.
pub struct LoggingGuard {
    _worker: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Telemetry sits next to the Markdown summary.
pub fn telemetry_path(outputs: &ResolvedOutputs) -> PathBuf {
    let dir = outputs
        .summary_md
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    dir.join("telemetry.jsonl")
}

/// `RUST_LOG` wins over the configured level when set.
fn build_filter(logging: &LoggingConfig) -> EnvFilter {
    let level = logging.level().unwrap_or(Level::INFO);
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy()
}

pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
    run_id: &str,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let telemetry_path = telemetry_path(outputs);
    if let Some(dir) = telemetry_path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating telemetry directory {}", dir.display()))?;
    }
    let file = File::create(&telemetry_path)
        .with_context(|| format!("creating {}", telemetry_path.display()))?;
    let (writer, worker) = NonBlockingBuilder::default().lossy(false).finish(file);

    let subscriber = tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_target(true)
        .with_env_filter(build_filter(logging))
        .with_writer(writer)
        .finish();

    // A test harness may have installed one already.
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already installed; telemetry goes to the existing one");
    }
    tracing::info!(target: "allfours_bench", run_id, "structured logging enabled");

    Ok(Some(LoggingGuard {
        _worker: worker,
        telemetry_path,
    }))
}

#[cfg(test)]
mod tests {
    use super::telemetry_path;
    use crate::config::ResolvedOutputs;
    use std::path::PathBuf;

    #[test]
    fn telemetry_lands_beside_the_summary() {
        let outputs = ResolvedOutputs {
            jsonl: PathBuf::from("out/run/matches.jsonl"),
            summary_md: PathBuf::from("out/run/summary.md"),
        };
        assert_eq!(telemetry_path(&outputs), PathBuf::from("out/run/telemetry.jsonl"));

        let bare = ResolvedOutputs {
            jsonl: PathBuf::from("matches.jsonl"),
            summary_md: PathBuf::from("summary.md"),
        };
        assert_eq!(telemetry_path(&bare), PathBuf::from("./telemetry.jsonl"));
    }
}
