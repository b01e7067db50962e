//! Logging initialization: human-readable lines (local timestamp, level, target, message, fields).
//!
//! Always written to a log file so the chat on stdout stays clean; optionally teed to stderr.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::{FmtSpan, Writer},
    fmt::time::FormatTime,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Local time in `YYYY-MM-DD HH:MM:SS`.
struct ChronoLocal;

impl FormatTime for ChronoLocal {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let t = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        write!(w, "{} ", t)
    }
}

/// Initializes the global tracing subscriber.
///
/// Log level from `RUST_LOG` (default `info`); load `.env` before calling. Parent directories of
/// `log_file_path` are created. With `also_stderr`, the same lines go to stderr.
pub fn init_tracing(log_file_path: &str, also_stderr: bool) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    let file = Arc::new(file);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file)
        .with_timer(ChronoLocal)
        .with_target(true)
        .with_level(true)
        .with_span_events(FmtSpan::NONE)
        .with_ansi(false);

    let stderr_layer = also_stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_timer(ChronoLocal)
            .with_target(true)
            .with_ansi(false)
    });

    Registry::default()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_log_file_and_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("companion.log");
        // A second init in the same process fails on the global subscriber, not on the file.
        let _ = init_tracing(path.to_str().unwrap(), false);
        assert!(path.exists());
    }
}
