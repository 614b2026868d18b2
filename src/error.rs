use std::io;

use thiserror::Error;

/// Errors surfaced by the detection core and its collaborators.
///
/// Per-file errors (`UnknownFormat`, `Tokenizer`) are isolated: the driver
/// reports them as skipped sources and moves on. `Store` errors abort the
/// run unless the driver was built in continue-on-store-error mode.
/// `InvalidConfig` is raised before any file is processed.
#[derive(Error, Debug)]
pub enum DetectError {
    #[error("unknown format: {0}")]
    UnknownFormat(String),

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("store unavailable: {0}")]
    Store(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("report error: {0}")]
    Report(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, DetectError>;
