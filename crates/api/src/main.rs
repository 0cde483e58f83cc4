//! Registrar - scheduled domain availability checks and registrations
//!
//! Main entry point for the command-line application.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use registrar_api::logging::{error_label, init_tracing};
use registrar_api::{commands, AppContext, Cli, Command};
use registrar_infra::config;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env before anything reads the environment
    let dotenv = dotenvy::dotenv();
    init_tracing();
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(err) => tracing::debug!(error = %err, "no .env file loaded"),
    }

    let cli = Cli::parse();
    let loaded = match &cli.config {
        Some(path) => config::load_from_file(Some(path.clone())),
        None => config::load(),
    };
    let config = loaded.inspect_err(|err| {
        tracing::error!(kind = error_label(err), error = %err, "failed to load configuration");
    })?;

    let ctx = AppContext::new(config).context("failed to initialise registry client")?;

    match cli.command() {
        Command::Check { domains } => {
            let results = commands::check(&ctx, &domains).await;
            let failed = results.iter().filter(|(_, result)| result.is_err()).count();
            Ok(exit_code(failed))
        }
        Command::Register { domains, detail } => {
            let detail = commands::parse_detail(detail.as_deref())?;
            let summary = commands::register(&ctx, &domains, &detail).await.summary();
            tracing::info!(
                total = summary.total,
                registered = summary.registered,
                rejected = summary.rejected,
                skipped = summary.skipped,
                failed = summary.failed,
                "registration finished"
            );
            Ok(exit_code(summary.failed + summary.rejected))
        }
        Command::Run => {
            let shutdown = async {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    tracing::error!(error = %err, "failed to listen for ctrl-c");
                }
            };
            commands::run(&ctx, shutdown).await.inspect_err(|err| {
                tracing::error!(kind = error_label(err), error = %err, "scheduler failed");
            })?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn exit_code(failures: usize) -> ExitCode {
    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
