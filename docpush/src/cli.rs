///
/// This module implements the CLI interface for docpush—command parsing,
/// argument validation and the main entrypoint.
///
/// All core business logic (block model, parsing, pipeline) lives in the
/// [`docpush-core`] crate. This module is strictly CLI glue, ergonomic
/// argument exposure, and orchestration.
///
/// ## How To Use
/// - For command-line users: use the installed `docpush` binary with `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// ## Extending
/// When adding subcommands, update [`Commands`] below and keep all
/// non-trivial business logic inside `docpush-core`.
///
use crate::client::LarkClient;
use crate::load_config::load_config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use docpush_core::publish::publish;
use std::path::PathBuf;

/// CLI for docpush: publish markup documents as remote document blocks.
#[derive(Parser)]
#[clap(
    name = "docpush",
    version,
    about = "Publish a lightweight-markup document into a remote document store and notify a chat webhook"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Publish the given markup file as a new remote document
    Publish {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Path to the markup file to publish
        #[clap(long)]
        input: PathBuf,
        /// Document title; defaults to a dated daily-report title
        #[clap(long)]
        title: Option<String>,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Publish {
            config,
            input,
            title,
        } => {
            let settings = load_config(config)?;
            tracing::info!(command = "publish", "Starting publish process");

            let markup = std::fs::read_to_string(&input).map_err(|e| {
                anyhow::anyhow!("Failed to read input file {:?}: {}", input, e)
            })?;
            let title = title.unwrap_or_else(|| {
                format!("Daily report {}", chrono::Local::now().format("%Y-%m-%d"))
            });

            let client = LarkClient::new(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to construct client: {e}"))?;
            // Webhook absence degrades to a skipped notification.
            let notifier = settings.webhook_url.is_some().then_some(&client);

            match publish(&settings, &client, notifier, &title, &markup).await {
                Ok(report) => {
                    let failed = report.batches.iter().filter(|o| !o.succeeded).count();
                    tracing::info!(
                        command = "publish",
                        url = %report.document_url,
                        batches = report.batches.len(),
                        failed_batches = failed,
                        notified = report
                            .notification
                            .as_ref()
                            .map(|n| n.delivered)
                            .unwrap_or(false),
                        "Publish complete"
                    );
                    println!("{}", report.document_url);
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "publish", error = %e, "Publish failed");
                    Err(anyhow::Error::new(e))
                }
            }
        }
    }
}
