// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nb - notification bridge CLI

mod commands;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use commands::{action_types, saved, send, serve};
use nb_adapters::{DesktopNotifyAdapter, NoOpNotifyAdapter, NotifyAdapter, TracedNotify};
use nb_core::NativeEvent;
use nb_engine::{AdapterKind, Config, NotificationService, StoreKind};
use nb_storage::{FileBackend, MemoryBackend, StoreBackend};
use tokio::sync::mpsc;

/// Capacity of the native callback channel.
const EVENT_BUFFER: usize = 64;

#[derive(Parser)]
#[command(
    name = "nb",
    version,
    about = "Notification bridge - schedule and track local notifications"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Restore saved notifications and serve JSON-lines commands on stdin
    Serve,
    /// Show a notification immediately
    Send(send::SendArgs),
    /// Print saved notification records
    Saved(saved::SavedArgs),
    /// Print a saved action group
    ActionTypes(action_types::ActionTypesArgs),
}

#[cfg(test)]
fn cli_command() -> clap::Command {
    Cli::command()
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(1);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, we skip
/// the "Caused by" chain to avoid noisy duplicate output.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            // No subcommand provided: print help and exit 0
            Cli::command().print_help()?;
            println!();
            return Ok(());
        }
    };

    let config = Config::from_env()?;
    let _log_guard = setup_logging(&config)?;
    tracing::debug!(state_dir = %config.state_dir.display(), "configuration loaded");

    match config.store {
        StoreKind::File => {
            let backend = FileBackend::new(config.store_dir());
            with_backend(command, &config, backend).await
        }
        StoreKind::Memory => with_backend(command, &config, MemoryBackend::new()).await,
    }
}

async fn with_backend<B: StoreBackend>(
    command: Commands,
    config: &Config,
    backend: B,
) -> Result<()> {
    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    match config.adapter {
        AdapterKind::Desktop => {
            // Only a long-running bridge has anyone to report responses to.
            let desktop = if matches!(command, Commands::Serve) {
                DesktopNotifyAdapter::interactive(&config.app_name, tx)
            } else {
                DesktopNotifyAdapter::new(&config.app_name, tx)
            };
            let adapter = TracedNotify::new(desktop);
            execute(command, NotificationService::new(adapter, backend)?, rx).await
        }
        AdapterKind::NoOp => {
            // Nothing will ever be presented.
            drop(tx);
            let adapter = TracedNotify::new(NoOpNotifyAdapter::new());
            execute(command, NotificationService::new(adapter, backend)?, rx).await
        }
    }
}

async fn execute<A, B>(
    command: Commands,
    service: NotificationService<A, B>,
    events: mpsc::Receiver<NativeEvent>,
) -> Result<()>
where
    A: NotifyAdapter,
    B: StoreBackend,
{
    match command {
        Commands::Serve => serve::handle(service, events).await,
        Commands::Send(args) => send::handle(args, &service).await,
        Commands::Saved(args) => saved::handle(args, &service),
        Commands::ActionTypes(args) => action_types::handle(args, &service),
    }
}

fn setup_logging(config: &Config) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_path = config.log_path();
    let log_dir = log_path
        .parent()
        .context("log path has no parent directory")?;
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(
        log_dir,
        log_path.file_name().context("log path has no file name")?,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
