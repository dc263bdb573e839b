use std::process::ExitCode;

use clap::Parser;
use tracing::Instrument;
use uuid::Uuid;

use cooksheet_cli::config::RunnerConfig;
use cooksheet_cli::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = RunnerConfig::parse();

    // --- Tracing ---
    init_tracing(config.log_format);
    tracing::debug!(?config, "Loaded runner configuration");

    // --- Run ---
    let run_id = Uuid::now_v7();
    let outcome = cooksheet_cli::run(&config, run_id)
        .instrument(tracing::info_span!("validate", %run_id))
        .await?;

    println!("{}", outcome.output);
    Ok(outcome.exit_code())
}
