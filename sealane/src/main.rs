//! `sealane`: compute sea routes from the command line.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sealane_cli::{
    NetworkArgs, RouteArgs, SnapArgs, run_chokepoints, run_info, run_route, run_snap,
};

/// Shortest sea routes between ports over a network of shipping lanes.
#[derive(Parser, Debug)]
#[command(name = "sealane", version, about, long_about = None)]
struct Cli {
    /// Verbose logging. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    network: NetworkArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the route between two positions.
    Route(RouteArgs),
    /// Show where a position lands on the lane network.
    Snap(SnapArgs),
    /// List the chokepoints reported on routes.
    Chokepoints,
    /// Print statistics of the loaded lane network.
    Info,
}

fn env_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let router = cli.network.router();
    let mut out = std::io::stdout().lock();
    let result = match &cli.command {
        Command::Route(args) => run_route(&router, args, &mut out),
        Command::Snap(args) => run_snap(&router, args, &mut out),
        Command::Chokepoints => run_chokepoints(&router, &mut out),
        Command::Info => run_info(&router, &cli.network, &mut out),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
