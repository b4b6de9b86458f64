use crate::probe_engine::{EngineError, ResolveError};
use crate::settings::SettingsError;
use std::io;
use thiserror::Error;

/// Startup and terminal failures that end the process with a non-zero code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("failed to set up logging: {0}")]
    Logging(#[source] io::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode statistics: {0}")]
    Json(#[from] serde_json::Error),
}
