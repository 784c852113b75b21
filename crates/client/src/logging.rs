//! File logging so the terminal stays free for the game.
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs a subscriber writing to `<dir>/session_<secs>/werewolf.log`.
///
/// Returns the log file path. `RUST_LOG` narrows or widens the default
/// `info` level.
pub fn setup_logging(log_dir: Option<&Path>) -> Result<PathBuf> {
    let base = match log_dir {
        Some(dir) => dir.to_path_buf(),
        None => default_log_directory(),
    };

    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let session_dir = base.join(format!("session_{secs}"));
    std::fs::create_dir_all(&session_dir)
        .with_context(|| format!("creating log directory {}", session_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&session_dir, "werewolf.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    // Keep the writer alive for the whole process.
    std::mem::forget(guard);

    let path = session_dir.join("werewolf.log");
    tracing::info!(target: "client", log = %path.display(), "logging initialized");
    Ok(path)
}

fn default_log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "werewolf")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("werewolf").join("logs"))
}
