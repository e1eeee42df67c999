//! CLI entry point for memdesk

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use memdesk_core::config::{Config, ConfigLoader};
use memdesk_core::logging::init_logging;
use memdesk_core::{MemoryKind, MemoryLayout};
use memdesk_manager::{run_server, AppState};
use memdesk_netinfo::{discover_network_info, print_startup_banner};
use std::path::PathBuf;
use tokio::sync::broadcast;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "memdesk")]
#[command(about = "Browser front-end for the short and long memory files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration directory
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,

    /// Directory holding the memory files
    #[arg(short, long, global = true)]
    base_dir: Option<PathBuf>,

    /// Listening port
    #[arg(short, long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Print the startup banner and serve the web front-end (default)
    Serve,
    /// Print the startup banner and exit
    Status,
    /// Create the memory directory and files, then exit
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_loader = if let Some(dir) = &cli.config_dir {
        ConfigLoader::with_dir(dir)
    } else {
        ConfigLoader::new()
    };
    let mut config = config_loader
        .load()
        .with_context(|| format!("loading config from {}", config_loader.config_dir().display()))?;
    apply_overrides(&mut config, &cli);

    let _log_guard = init_logging(&config.logging);

    let layout = MemoryLayout::from_config(&config.storage)?;
    layout
        .ensure()
        .with_context(|| format!("preparing memory directory {}", layout.directory().display()))?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            info!("Starting memdesk");
            run_serve(config, layout).await?;
        }
        Commands::Status => {
            info!("Showing status");
            let net = discover_network_info(&config.network).await;
            print_startup_banner(&net, config.server.port, &layout);
        }
        Commands::Init => {
            println!("{}", style("Memory files ready:").green().bold());
            for kind in [MemoryKind::Short, MemoryKind::Long] {
                println!("  {}: {}", kind.key(), layout.path_of(kind).display());
            }
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(dir) = &cli.base_dir {
        config.storage.base_dir = dir.to_string_lossy().to_string();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
}

async fn run_serve(config: Config, layout: MemoryLayout) -> Result<()> {
    let net = discover_network_info(&config.network).await;
    print_startup_banner(&net, config.server.port, &layout);

    let state = AppState::new(config, layout)?;
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let mut server = tokio::spawn(run_server(state, shutdown_rx));

    println!("{}", style("memdesk is running. Press Ctrl+C to stop.").green());

    tokio::select! {
        result = &mut server => {
            // The server only returns on its own when binding or accepting fails.
            return result.context("server task panicked")?;
        }
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                error!("Failed to listen for Ctrl+C: {}", e);
            }
        }
    }

    println!("\n{}", style("Shutting down...").yellow());
    let _ = shutdown_tx.send(());
    server.await.context("server task panicked")??;
    println!("{}", style("memdesk stopped.").green());
    Ok(())
}
