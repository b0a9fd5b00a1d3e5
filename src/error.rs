// src/error.rs
//! Failure taxonomy shared by the store, importer and dashboard source

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    /// Backing file is absent. Readers treat this as an empty collection.
    #[error("job data file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to parse job data in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("job data I/O failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("spreadsheet import failed: {0}")]
    Import(String),

    #[error("dashboard data unavailable: {0}")]
    UpstreamFetch(String),
}

impl BoardError {
    /// Stable code used in JSON error envelopes
    pub fn code(&self) -> &'static str {
        match self {
            BoardError::NotFound(_) => "NOT_FOUND",
            BoardError::Parse { .. } => "PARSE_FAILURE",
            BoardError::Io { .. } => "IO_FAILURE",
            BoardError::Import(_) => "IMPORT_FAILURE",
            BoardError::UpstreamFetch(_) => "UPSTREAM_FETCH_FAILURE",
        }
    }
}

pub type BoardResult<T> = std::result::Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_per_variant() {
        let errors = [
            BoardError::NotFound(PathBuf::from("data/jobs.json")),
            BoardError::Import("no sheets".to_string()),
            BoardError::UpstreamFetch("HTTP 500".to_string()),
        ];
        let codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes, vec!["NOT_FOUND", "IMPORT_FAILURE", "UPSTREAM_FETCH_FAILURE"]);
    }

    #[test]
    fn not_found_message_names_the_path() {
        let err = BoardError::NotFound(PathBuf::from("data/jobs.json"));
        assert!(err.to_string().contains("data/jobs.json"));
    }

    #[test]
    fn io_message_does_not_assume_a_write() {
        let err = BoardError::Io {
            path: PathBuf::from("data/jobs.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert_eq!(message, "job data I/O failed for data/jobs.json: denied");
        assert!(!message.contains("write"));
    }
}
