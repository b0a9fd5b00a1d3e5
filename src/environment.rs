// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::pagination::DEFAULT_PAGE_SIZE;

pub const DASHBOARD_DATA_PATH: &str = "/api/dashboard/jobs";

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_upload_limit_mb() -> u64 {
    10
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// JSON file holding the job collection
    pub data_path: PathBuf,
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_upload_limit_mb")]
    pub upload_limit_mb: u64,
    /// Feed read by the dashboard. Defaults to this server's own endpoint.
    #[serde(default)]
    pub dashboard_data_url: Option<String>,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Configuration with defaults for everything but the data file
    pub fn with_data_path(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            address: default_address(),
            port: default_port(),
            page_size: default_page_size(),
            upload_limit_mb: default_upload_limit_mb(),
            dashboard_data_url: None,
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }

    /// Load the section of `config_path` matching the current environment
    pub fn load(config_path: &Path) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        if !config_path.exists() {
            anyhow::bail!(
                "{} not found. Server cannot start without configuration.",
                config_path.display()
            );
        }

        let config_content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let mut config = Self::from_yaml(&config_content, &environment)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config.data_path = Self::resolve_path(&config.data_path)?;

        if let Ok(port) = std::env::var("ROCKET_PORT") {
            config.port = port
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?;
        }

        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("JOBBOARD_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;

        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    fn resolve_path(path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }

    /// URL the dashboard fetches its jobs from
    pub fn dashboard_url(&self) -> String {
        self.dashboard_data_url.clone().unwrap_or_else(|| {
            let host = match self.address.as_str() {
                "0.0.0.0" | "::" => "127.0.0.1",
                other => other,
            };
            format!("http://{}:{}{}", host, self.port, DASHBOARD_DATA_PATH)
        })
    }
}
