// src/core/job_store.rs
//! Whole-document JSON persistence for the job collection

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

use crate::error::{BoardError, BoardResult};
use crate::types::Job;

/// Reads and writes the entire collection as one pretty-printed JSON array.
/// Nothing is cached: every load goes back to disk.
#[derive(Debug, Clone)]
pub struct JobStore {
    path: PathBuf,
}

impl JobStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection, reporting why it could not be read
    pub async fn try_load(&self) -> BoardResult<Vec<Job>> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(BoardError::NotFound(self.path.clone()))
            }
            Err(source) => {
                return Err(BoardError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&data).map_err(|source| BoardError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Load the collection. Absent or malformed data yields an empty list.
    pub async fn load(&self) -> Vec<Job> {
        match self.try_load().await {
            Ok(jobs) => {
                info!("Loaded {} jobs from {}", jobs.len(), self.path.display());
                jobs
            }
            Err(e @ BoardError::NotFound(_)) => {
                warn!("{}", e);
                Vec::new()
            }
            Err(e) => {
                error!("{}", e);
                Vec::new()
            }
        }
    }

    /// Overwrite the backing file with `jobs`. Not atomic.
    pub async fn save(&self, jobs: &[Job]) -> BoardResult<()> {
        let io_error = |source: std::io::Error| BoardError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(io_error)?;
            }
        }

        let body = serde_json::to_string_pretty(jobs)
            .map_err(|e| io_error(std::io::Error::new(ErrorKind::InvalidData, e)))?;

        fs::write(&self.path, body).await.map_err(io_error)?;

        info!("Saved {} jobs to {}", jobs.len(), self.path.display());
        Ok(())
    }
}
