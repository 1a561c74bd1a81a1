use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SymSpellError>;

/// Errors reported by the engine.
///
/// Query operations that simply find nothing are not errors; they return an
/// empty suggestion list instead.
#[derive(Debug, Error)]
pub enum SymSpellError {
    /// Invalid constructor parameters.
    #[error("invalid configuration: {0}")]
    Config(&'static str),

    /// Invalid parameters passed to an individual call.
    #[error("invalid argument: {0}")]
    Argument(&'static str),

    /// I/O failure while reading a dictionary stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
