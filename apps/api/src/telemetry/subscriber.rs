use std::fs::{File, OpenOptions};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Keeps the log file open for the life of the process and syncs it on drop.
pub struct LogGuard {
    file: Arc<File>,
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        let _ = self.file.sync_all();
    }
}

/// Installs the global subscriber: human-readable console output plus JSON
/// lines appended to `config.log_file`. Call once, before anything logs.
pub fn init(config: &Config) -> Result<LogGuard> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file '{}'", config.log_file))?;
    let file = Arc::new(file);

    let directives = filter_directives(config);
    let filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter '{directives}'"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(Arc::clone(&file)),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LogGuard { file })
}

/// The configured level applies to this crate; request traces stay at info.
fn filter_directives(config: &Config) -> String {
    format!(
        "{}={},tower_http=info",
        env!("CARGO_CRATE_NAME"),
        config.rust_log
    )
}
