use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file path. Logging is off when unset.
pub const LOG_ENV: &str = "DBGBOOT_LOG";

/// Initialize file logging when `DBGBOOT_LOG` names a path.
///
/// Each run writes to its own `{path}.{timestamp}.{pid}` file.
pub fn init_tracing() {
    let Some(path) = log_file_path(std::env::var(LOG_ENV).ok()) else {
        // No console fallback: stdout and stderr belong to the engine.
        return;
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file = match std::fs::File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: cannot create log file {}: {}", path.display(), err);
            return;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

/// Per-run log file for the configured base path; `None` when unset or empty.
fn log_file_path(base: Option<String>) -> Option<PathBuf> {
    let base = base.filter(|b| !b.is_empty())?;
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    Some(PathBuf::from(format!("{}.{}.{}", base, timestamp, std::process::id())))
}
