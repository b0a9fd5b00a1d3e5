use anyhow::Result;
use clap::Parser;
use jobboard::cli::{handle_command, JobBoardCli};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

#[tokio::main]
async fn main() -> Result<()> {
    Registry::default()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jobboard=info,rocket::server=off")),
        )
        .init();

    handle_command(JobBoardCli::parse()).await
}
