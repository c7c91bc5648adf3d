use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("property {name}: {reason}")]
    Property { name: String, reason: String },

    #[error("line {line}: {reason}")]
    InvalidEvent { line: usize, reason: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    pub fn property(name: &str, reason: impl Into<String>) -> Self {
        Error::Property { name: name.to_string(), reason: reason.into() }
    }
}

/// Failure reported by a performance-boost backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoostError {
    #[error("backend rejected hint {hint:#x} (ret {code})")]
    Rejected { hint: u32, code: i32 },

    #[error("boost backend unavailable")]
    Unavailable,
}
