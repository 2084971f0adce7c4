//! hcloud-connect
//!
//! Registers this node's server as a target of a Hetzner Cloud load
//! balancer, or removes it. Intended to be called from node lifecycle
//! hooks (boot/shutdown units, init containers, preStop hooks).
//!
//! # Architecture Overview
//!
//! ```text
//!   env + optional TOML
//!          │
//!          ▼
//!   ┌─────────────┐   ┌──────────────┐   ┌──────────────────────┐
//!   │   config    │──▶│  lifecycle   │──▶│ LoadBalancerHandle   │
//!   │ load/valid. │   │   startup    │   │ (resolved once)      │
//!   └─────────────┘   └──────┬───────┘   └──────────┬───────────┘
//!                            │                      │
//!                            ▼                      ▼
//!                     ┌─────────────┐      ┌──────────────────┐
//!                     │ Cloud       │─────▶│ register /       │──▶ Hetzner
//!                     │ (client +   │      │ deregister       │    Cloud API
//!                     │  node name) │      └──────────────────┘
//!                     └─────────────┘
//! ```

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use hcloud_connect::config::load_config;
use hcloud_connect::lifecycle::startup;
use hcloud_connect::load_balancer::LoadBalancerHandle;
use hcloud_connect::observability::logging;

#[derive(Parser)]
#[command(name = "hcloud-connect")]
#[command(about = "Register cluster nodes with a Hetzner Cloud load balancer", long_about = None)]
struct Cli {
    /// Optional TOML configuration file; environment variables override it.
    #[arg(short, long, env = "HCLOUD_CONNECT_CONFIG")]
    config: Option<PathBuf>,

    /// Node name, overriding NODE_NAME.
    #[arg(short, long)]
    node: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the configured load balancer and print its ID
    Resolve,
    /// Add this node as a load balancer target
    Register,
    /// Remove this node from the load balancer targets
    Deregister,
    /// Report whether this node is currently a target
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprint!("{}", error_report(e.as_ref()));
            ExitCode::FAILURE
        }
    }
}

/// The error followed by its chain of causes, one per line.
fn error_report(e: &dyn Error) -> String {
    let mut report = format!("Error: {}\n", e);
    let mut source = e.source();
    while let Some(cause) = source {
        report.push_str(&format!("  caused by: {}\n", cause));
        source = cause.source();
    }
    report
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(node) = cli.node {
        config.node.name = Some(node);
    }

    if let Err(e) = logging::init(&config.observability) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    tracing::debug!(
        endpoint = %config.api.endpoint,
        load_balancer = ?config.load_balancer.name,
        use_private_network = config.load_balancer.use_private_network,
        "Configuration loaded"
    );

    if let Commands::Resolve = cli.command {
        let client = startup::build_client(&config)?;
        let handle = LoadBalancerHandle::resolve(client.as_ref(), &config.load_balancer).await?;
        println!("{}", handle.identifier());
        return Ok(());
    }

    let connector = startup::start(&config).await?;
    let handle = &connector.load_balancer;
    let cloud = &connector.cloud;

    match cli.command {
        Commands::Register => handle.register(cloud).await?,
        Commands::Deregister => handle.deregister(cloud).await?,
        Commands::Status => {
            let registered = handle.is_registered(cloud).await?;
            println!("{}", if registered { "registered" } else { "not registered" });
        }
        Commands::Resolve => {}
    }

    Ok(())
}
