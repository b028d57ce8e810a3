use crate::utils::error::{InventoryError, Result};
use std::path::Path;
use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Installs the global subscriber: an append-only file log plus, when
/// `verbose`, a compact stderr layer.
pub fn init_logger(log_file: &Path, level: &str, verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("small_inventory={}", level)));

    let stderr_layer = verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer(log_file)?)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| InventoryError::ConfigError {
            message: format!("failed to install logger: {}", e),
        })
}

/// Timestamped, leveled plain-text lines appended to `log_file`. The file
/// and its directory are created on first use and never truncated.
pub fn file_layer<S>(log_file: &Path) -> Result<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = log_file
        .file_name()
        .ok_or_else(|| InventoryError::ConfigError {
            message: format!("log file path has no file name: {}", log_file.display()),
        })?;
    std::fs::create_dir_all(directory)?;
    let appender = tracing_appender::rolling::never(directory, file_name);

    Ok(tracing_subscriber::fmt::layer()
        .with_writer(appender)
        .with_ansi(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false))
}
