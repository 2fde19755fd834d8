use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Database not found at {}", .0.display())]
    StoreNotFound(PathBuf),

    #[error("No data found for {0}")]
    NoDataForTarget(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid redaction pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Parse(err.to_string())
        } else {
            Error::NetworkFailure(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Errors the ingest loop isolates to a single tag before moving on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::NetworkFailure(_) | Error::Parse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_kinds() {
        assert!(Error::NetworkFailure("reset".into()).is_recoverable());
        assert!(Error::Parse("missing field `title`".into()).is_recoverable());
        assert!(!Error::StorageUnavailable("read-only".into()).is_recoverable());
        assert!(!Error::NoDataForTarget("plivo".into()).is_recoverable());
    }

    #[test]
    fn test_store_not_found_message() {
        let err = Error::StoreNotFound(PathBuf::from("analyze_store/market_friction.db"));
        assert_eq!(
            err.to_string(),
            "Database not found at analyze_store/market_friction.db"
        );
    }
}
