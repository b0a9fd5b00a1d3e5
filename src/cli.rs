// src/cli.rs
use crate::core::analytics::build_report;
use crate::core::importer::import_spreadsheet;
use crate::core::JobStore;
use crate::environment::EnvironmentConfig;
use crate::web::start_web_server;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "jobboard")]
#[command(about = "Browse, import and analyze job listings")]
pub struct JobBoardCli {
    #[command(subcommand)]
    pub command: Option<BoardCommand>,

    /// YAML configuration file
    #[arg(long, global = true, default_value = "config.yaml")]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum BoardCommand {
    /// Start the web server (default)
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Replace the stored jobs with the rows of a workbook
    Import { file: PathBuf },
    /// Print the dashboard report for the stored jobs as JSON
    Stats,
}

pub async fn handle_command(cli: JobBoardCli) -> Result<()> {
    let mut environment = EnvironmentConfig::load(&cli.config)?;

    match cli.command.unwrap_or(BoardCommand::Serve { port: None }) {
        BoardCommand::Serve { port } => {
            if let Some(port) = port {
                environment.port = port;
            }
            start_web_server(environment).await
        }

        BoardCommand::Import { file } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let store = JobStore::new(environment.data_path);
            let summary = import_spreadsheet(&store, &bytes).await?;

            info!(
                "Imported {} jobs from {} into {}",
                summary.imported,
                file.display(),
                store.path().display()
            );
            if !summary.ignored_columns.is_empty() {
                info!("Ignored columns: {}", summary.ignored_columns.join(", "));
            }
            Ok(())
        }

        BoardCommand::Stats => {
            let jobs = JobStore::new(environment.data_path).load().await;
            let report = build_report(&jobs);
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = JobBoardCli::parse_from(["jobboard"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("config.yaml"));
    }

    #[test]
    fn config_flag_is_global() {
        let cli = JobBoardCli::parse_from(["jobboard", "import", "jobs.xlsx", "--config", "prod.yaml"]);
        assert_eq!(cli.config, PathBuf::from("prod.yaml"));
        assert!(matches!(cli.command, Some(BoardCommand::Import { ref file }) if file == &PathBuf::from("jobs.xlsx")));
    }

    #[test]
    fn serve_accepts_port() {
        let cli = JobBoardCli::parse_from(["jobboard", "serve", "--port", "9000"]);
        assert!(matches!(cli.command, Some(BoardCommand::Serve { port: Some(9000) })));
    }
}
