//! Errors at the data boundary (level files, saved progress).
//!
//! The matching core itself never fails; these only arise while loading or
//! saving external data.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum DataError {
    Io { path: PathBuf, source: std::io::Error },
    Json(serde_json::Error),
    InvalidLevel { level: u32, reason: String },
    UnknownLevel(u32),
}

impl DataError {
    pub(crate) fn invalid(level: u32, reason: impl Into<String>) -> Self {
        Self::InvalidLevel {
            level,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on {}: {source}", path.display()),
            Self::Json(e) => write!(f, "malformed json: {e}"),
            Self::InvalidLevel { level, reason } => write!(f, "invalid level {level}: {reason}"),
            Self::UnknownLevel(id) => write!(f, "no level with id {id}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
