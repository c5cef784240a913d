use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Logs to stdout, filtered by `RUST_LOG` (default `info`).
pub fn init_stdout() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_target(false)
        .init();
}

/// Logs to an append-only file so the terminal UI keeps the screen.
pub fn init_file(path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
