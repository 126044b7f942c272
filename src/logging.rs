use std::{fs::OpenOptions, path::Path, sync::Mutex};

use anyhow::{Context, anyhow};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. The terminal belongs to the UI, so logs go
/// to `log_file` when one is given and are discarded otherwise.
pub fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::sink).try_init(),
    };
    installed.map_err(|err| anyhow!("installing log subscriber failed: {err}"))
}
