mod table;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use nodescope_core::{view::filter_by_name, FetchOutcome, MonitorConfig};
use nodescope_fetch::{http_fetcher, http_poller, resolve_candidates};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nodescope")]
#[command(about = "nodescope - cluster node telemetry viewer", long_about = None)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Overrides for values otherwise read from the environment.
#[derive(Args)]
struct SourceArgs {
    /// Base URL the dashboard is served from (same-origin endpoints)
    #[arg(long, global = true)]
    origin: Option<String>,

    /// Settings service base URL used when same-origin endpoints fail
    #[arg(long, global = true)]
    service_url: Option<String>,

    /// Polling interval in milliseconds
    #[arg(long, global = true)]
    interval_ms: Option<u64>,

    /// Per-request timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll continuously and redraw the node table (default)
    Watch {
        /// Only show nodes whose name contains this text
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Fetch once and print the result
    Once {
        /// Only show nodes whose name contains this text
        #[arg(short, long, default_value = "")]
        search: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        output: String,
    },

    /// Print the endpoints that would be tried, in order
    Endpoints,
}

fn load_config(args: &SourceArgs) -> Result<MonitorConfig> {
    let mut config = MonitorConfig::from_env()?;

    if let Some(origin) = &args.origin {
        config.origin = origin.clone();
    }
    if let Some(url) = &args.service_url {
        config.service_url = Some(url.clone());
    }
    if let Some(ms) = args.interval_ms {
        config.poll_interval_ms = ms;
    }
    if let Some(ms) = args.timeout_ms {
        config.request_timeout_ms = Some(ms);
    }

    tracing::debug!(?config, "Loaded monitor config");
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.source)?;

    match cli.command {
        Some(Commands::Watch { search }) => cmd_watch(&config, &search).await?,
        Some(Commands::Once { search, output }) => cmd_once(&config, &search, &output).await?,
        Some(Commands::Endpoints) => cmd_endpoints(&config),
        None => cmd_watch(&config, "").await?,
    }

    Ok(())
}

async fn cmd_watch(config: &MonitorConfig, search: &str) -> Result<()> {
    let handle = http_poller(config)?.start();
    let mut updates = handle.subscribe();
    let mut stdout = io::stdout();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let outcome = updates.borrow_and_update().clone();
                print!("\x1B[2J\x1B[1;1H");
                print_outcome(&outcome, search);
                println!();
                println!("  Refreshing every {} ms, Ctrl+C to quit", config.poll_interval().as_millis());
                stdout.flush()?;
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}

async fn cmd_once(config: &MonitorConfig, search: &str, output_format: &str) -> Result<()> {
    let outcome = http_fetcher(config)?.poll_once().await;

    match output_format {
        "json" => {
            let nodes = filter_by_name(&outcome.nodes, search);
            let body = serde_json::json!({
                "success": outcome.success,
                "error": outcome.error,
                "nodes": nodes,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        _ => print_outcome(&outcome, search),
    }

    Ok(())
}

fn cmd_endpoints(config: &MonitorConfig) {
    println!();
    println!("Node endpoints (tried in order):");
    println!("{:-<65}", "");
    for (i, candidate) in resolve_candidates(config).iter().enumerate() {
        println!("  {:<4} {:<12} {}", i + 1, candidate.tier.to_string(), candidate.url);
    }
    println!();
}

fn print_outcome(outcome: &FetchOutcome, search: &str) {
    if let Some(err) = &outcome.error {
        println!("Nodes fetch error: {}", err);
        println!();
    }

    let nodes = filter_by_name(&outcome.nodes, search);
    println!("{} Nodes", nodes.len());
    println!();

    if !outcome.success {
        println!("  No nodes available");
        return;
    }

    print!("{}", table::render(&nodes));
}
