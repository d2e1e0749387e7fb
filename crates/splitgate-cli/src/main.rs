mod args;
mod config;
mod output;
mod reconcile;
mod run;
mod verify;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use uuid::Uuid;

use splitgate_common::telemetry::{init_tracing, shutdown_tracing, TelemetryOptions};
use splitgate_gateway::AzCliGateway;

use crate::args::Args;
use crate::config::RunConfig;
use crate::output::{conclude, Progress};
use crate::run::run;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let provider = init_tracing(&TelemetryOptions {
        service_name: "splitgate".to_string(),
        otlp_endpoint: args.otlp_endpoint.clone(),
        otlp_token: args.otlp_token.clone(),
    });

    let run_id = Uuid::new_v4();
    let progress = Progress::for_format(args.format);
    tracing::info!(%run_id, az_bin = %args.az_bin, "splitgate starting");

    let result = match RunConfig::from_args(&args) {
        Ok(config) => {
            let gateway = AzCliGateway::new(&args.az_bin);
            run(&gateway, &config, run_id, &progress).await
        }
        Err(e) => Err(e),
    };

    let code = conclude(result, args.format, &progress, run_id);

    shutdown_tracing(provider);
    Ok(code)
}
