use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a file-backed subscriber. The terminal belongs to the UI, so
/// nothing is logged unless a log file was requested.
///
/// The level is taken from `RUST_LOG` (for example `RUST_LOG=pingpulse=debug`),
/// defaulting to `info`.
pub fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_thread_names(true),
        )
        .try_init()
        .map_err(io::Error::other)
}
