use std::fs;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable that overrides the default log filter.
pub const LOG_ENV_VAR: &str = "SPARROW_LOG";

/// Initialize structured logging.
///
/// Events go to the console; when `log_dir` is set, they are also appended to a
/// dated `sparrow-YYYY-MM-DD.log` file in that directory, so repeated batch runs
/// on the same day share one file. Defaults to `info` level unless overridden
/// by `SPARROW_LOG`. Safe to call more than once; later calls are no-ops.
pub fn init(log_dir: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_env_var(LOG_ENV_VAR)
        .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());

    let Some(dir) = log_dir else {
        let _ = registry.try_init();
        return Ok(());
    };

    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory '{}'", dir.display()))?;

    let file_name = format!("sparrow-{}.log", chrono::Local::now().format("%Y-%m-%d"));
    let path = dir.join(file_name);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file '{}'", path.display()))?;

    let _ = registry
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();

    Ok(())
}
