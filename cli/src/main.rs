// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Scholar Research Assistant CLI
//!
//! The `scholar` binary answers research questions from a pgvector paper
//! store, either once from the command line or over HTTP.
//!
//! ## Commands
//!
//! - `scholar ask <QUERY>` - Run one research query and print the answer
//! - `scholar serve` - Serve `POST /api/research` until interrupted
//! - `scholar check` - Verify the datastore and generation provider are reachable
//! - `scholar config show|validate|generate` - Configuration management

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use scholar_cli::commands::{self, AskArgs, ConfigCommand, ServeArgs};
use scholar_core::assistant_config::AssistantConfigManifest;

/// Scholar - grounded answers from the scientific literature
#[derive(Parser)]
#[command(name = "scholar")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "SCHOLAR_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); defaults to the configured level
    #[arg(long, global = true, env = "SCHOLAR_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a research question
    #[command(name = "ask")]
    Ask(AskArgs),

    /// Serve the research API over HTTP
    #[command(name = "serve")]
    Serve(ServeArgs),

    /// Check datastore and provider connectivity
    #[command(name = "check")]
    Check,

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logging settings come from the config file, so load it before the subscriber exists
    let manifest = AssistantConfigManifest::load_or_default(cli.config.clone());
    let logging = manifest
        .as_ref()
        .ok()
        .and_then(|m| m.spec.observability.as_ref())
        .and_then(|o| o.logging.as_ref());

    let level = cli
        .log_level
        .clone()
        .or_else(|| logging.map(|l| l.level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let json = logging.map(|l| l.format == "json").unwrap_or(false);

    init_logging(&level, json)?;

    match cli.command {
        Some(Commands::Ask(args)) => commands::ask::execute(args, manifest?).await,
        Some(Commands::Serve(args)) => commands::serve::execute(args, manifest?).await,
        Some(Commands::Check) => commands::check::execute(manifest?).await,
        Some(Commands::Config { command }) => {
            commands::config::handle_command(command, cli.config).await
        }
        None => {
            // No command provided - show help
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }

    Ok(())
}
