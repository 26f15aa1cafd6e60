use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::scanner::Mode;

/// Length of the input excerpt carried by diagnostics.
pub const SNIPPET_LEN: usize = 40;

/// Every way a conversion can fail. None of them is recoverable: the
/// document or the rule set has drifted and must be fixed first.
#[derive(Debug, Error)]
pub enum ManifyError {
    #[error("line {line}: {message}: {snippet:?}")]
    InputShape {
        line: usize,
        message: &'static str,
        snippet: String,
    },

    #[error("line {line}: {source}")]
    Capacity {
        line: usize,
        source: CapacityExceeded,
    },

    #[error("failed to {action} {}: {source}", path.display())]
    Resource {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    #[error("failed to write {target}: {source}")]
    Write { target: String, source: io::Error },

    #[error("contract violation: {0}")]
    Contract(String),

    #[error("line {line}: no rule matches in {mode} mode: {snippet:?}")]
    Unmatched {
        line: usize,
        mode: Mode,
        snippet: String,
    },
}

/// A construct outgrew the configured buffer capacity.
#[derive(Debug, Error)]
#[error("{len} bytes exceed buffer capacity of {capacity}: {snippet:?}")]
pub struct CapacityExceeded {
    pub len: usize,
    pub capacity: usize,
    pub snippet: String,
}

/// Matched text did not have the shape its handler relies on.
#[derive(Debug, Error)]
#[error("{message}: {snippet:?}")]
pub struct ShapeViolation {
    pub message: &'static str,
    pub snippet: String,
}

pub type Result<T> = std::result::Result<T, ManifyError>;
