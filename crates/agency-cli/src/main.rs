//! `agency` binary entry point

use agency_cli::{cli, execute};
use agency_core::{AgencyConfig, Dashboard};
use anyhow::Context;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> anyhow::Result<()> {
    let matches = cli::command().get_matches();
    let config_path = matches.get_one::<PathBuf>("config").map(PathBuf::as_path);
    let config = AgencyConfig::load(config_path).context("loading configuration")?;
    init_tracing(&config.log_level);

    let dashboard = Dashboard::open(&config).await.context("opening dataset")?;
    tracing::debug!("Dashboard ready, today is {}", dashboard.clock().today());
    let output = execute(&dashboard, &matches).await?;
    println!("{output}");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
