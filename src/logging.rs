//! Logger setup for the binaries. Filtering follows `RUST_LOG` (default `info`).

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

fn builder() -> env_logger::Builder {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format_module_path(false);
    builder
}

/// Send log records to `path`, truncating it. Keeps the alternate screen clean.
pub fn init_file(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    builder()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")
}

/// Send log records to stderr; stdout stays free for protocol output.
pub fn init_stderr() -> Result<()> {
    builder()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .try_init()
        .context("installing logger")
}
