//! Portal CLI - Command line driver for the ordering portal.
//!
//! Commands:
//! - `portal cart` - Inspect and edit the cart of the current session
//! - `portal quote` - Turn selected cart lines into a quote draft
//! - `portal list` - Search, sort and page through a JSON listing
//! - `portal config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CartArgs, ConfigArgs, ListArgs, QuoteArgs};

/// Portal CLI - Manage carts and listings of the ordering portal
#[derive(Parser)]
#[command(name = "portal")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Act as this customer instead of the guest session
    #[arg(long, global = true)]
    customer: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and edit the cart
    Cart(CartArgs),

    /// Request a price quote for selected cart lines
    Quote(QuoteArgs),

    /// Search, sort and page through a JSON listing
    List(ListArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("PORTAL_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.json);

    // Load config
    let loaded = context::Context::load(
        cli.config.as_deref(),
        cli.customer.as_deref(),
        output.clone(),
    );
    let ctx = match loaded {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Quote(args) => commands::quote::run(args, &ctx),
        Commands::List(args) => commands::list::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
