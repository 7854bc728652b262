use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log lines go for this run.
#[derive(Debug, PartialEq)]
pub enum LogTarget<'a> {
    /// Append to a file (the only option while the TUI owns the terminal).
    File(&'a Path),
    Stderr,
    Discard,
}

impl<'a> LogTarget<'a> {
    pub fn select(log_file: Option<&'a Path>, interactive: bool) -> Self {
        match log_file {
            Some(path) => LogTarget::File(path),
            None if interactive => LogTarget::Discard,
            None => LogTarget::Stderr,
        }
    }
}

/// Installs the global subscriber. Level comes from RUST_LOG, default `info`.
pub fn init(target: LogTarget<'_>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::Discard => builder.with_writer(std::io::sink).try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}
