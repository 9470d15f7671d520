//! `tracing` setup. The TUI owns stdout, so events go to a file.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const APP_NAME: &str = "chat-app";
const DEFAULT_FILTER: &str = "info";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Install the global subscriber and return the log file path.
///
/// Later calls are no-ops that hand back the first path.
pub fn init_logging(log_dir: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = LOG_PATH.get() {
        return Ok(path.clone());
    }

    let dir = resolve_log_dir(log_dir);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory: {}", dir.display()))?;

    let file_name = format!("{APP_NAME}.log");
    let full_path = dir.join(&file_name);

    let appender = tracing_appender::rolling::never(&dir, &file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;

    let _ = LOG_PATH.set(full_path.clone());
    Ok(full_path)
}

fn resolve_log_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_NAME))
        .unwrap_or_else(|| std::env::temp_dir().join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_dir_wins() {
        let dir = Path::new("/tmp/somewhere");
        assert_eq!(resolve_log_dir(Some(dir)), PathBuf::from("/tmp/somewhere"));
    }

    #[test]
    fn test_default_dir_is_app_scoped() {
        assert!(resolve_log_dir(None).ends_with(APP_NAME));
    }

    #[test]
    fn test_init_creates_log_dir_and_is_idempotent() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let dir = tmp.path().join("logs");

        let first = init_logging(Some(&dir))?;
        assert!(dir.is_dir());
        assert_eq!(first, dir.join("chat-app.log"));

        let second = init_logging(Some(tmp.path()))?;
        assert_eq!(first, second);
        Ok(())
    }
}
