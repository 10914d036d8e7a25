//! Error types shared by the utility crate itself.

use thiserror::Error;

/// Errors raised by `tlc-util`'s own helpers.
#[derive(Debug, Error)]
pub enum UtilError {
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, UtilError>;
