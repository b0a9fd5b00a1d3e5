// src/core/dashboard_source.rs
//! HTTP client for the dashboard's job feed, with the sample-data fallback

use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{info, warn};

use crate::core::sample_data::sample_jobs;
use crate::error::{BoardError, BoardResult};
use crate::types::Job;

pub const FALLBACK_NOTICE: &str = "Could not load external data. Using sample data instead.";

/// Jobs the dashboard aggregates, and whether they came from the fallback
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub jobs: Vec<Job>,
    pub using_sample_data: bool,
    pub notice: Option<String>,
}

impl DashboardData {
    /// Substitute the built-in sample set when the feed failed
    pub fn from_feed(feed: BoardResult<Vec<Job>>) -> Self {
        match feed {
            Ok(jobs) => Self {
                jobs,
                using_sample_data: false,
                notice: None,
            },
            Err(e) => {
                warn!("{}. Falling back to sample data", e);
                Self {
                    jobs: sample_jobs(),
                    using_sample_data: true,
                    notice: Some(FALLBACK_NOTICE.to_string()),
                }
            }
        }
    }
}

/// Validate a feed response: success status, JSON content type and a body
/// that decodes as a job array.
pub fn decode_feed(
    status: StatusCode,
    content_type: Option<&str>,
    body: &str,
) -> BoardResult<Vec<Job>> {
    if !status.is_success() {
        return Err(BoardError::UpstreamFetch(format!(
            "failed to load job data: HTTP {}",
            status
        )));
    }

    match content_type {
        Some(ct) if ct.contains("application/json") => {}
        other => {
            return Err(BoardError::UpstreamFetch(format!(
                "expected JSON but got {}",
                other.unwrap_or("no content type")
            )))
        }
    }

    serde_json::from_str(body)
        .map_err(|e| BoardError::UpstreamFetch(format!("invalid job data: {}", e)))
}

pub struct DashboardSource {
    client: reqwest::Client,
    url: String,
}

impl DashboardSource {
    pub fn new(url: String, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, url })
    }

    pub async fn fetch_jobs(&self) -> BoardResult<Vec<Job>> {
        info!("Fetching dashboard data from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| BoardError::UpstreamFetch(format!("request failed: {}", e)))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let body = response
            .text()
            .await
            .map_err(|e| BoardError::UpstreamFetch(format!("failed to read body: {}", e)))?;

        decode_feed(status, content_type.as_deref(), &body)
    }

    /// Fetch the feed, falling back to sample data on any failure
    pub async fn load(&self) -> DashboardData {
        DashboardData::from_feed(self.fetch_jobs().await)
    }
}
