//! # certreg CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use certreg_cli::cert::{run_cert, CertArgs};
use certreg_cli::init::{run_init, InitArgs};
use certreg_cli::issuer::{run_issuer, IssuerArgs};
use certreg_cli::serve::{run_serve, ServeArgs};

/// Certificate registry CLI.
///
/// Manages an append-only certificate ledger with an admin-controlled
/// issuer set, stored as a local JSON snapshot.
#[derive(Parser, Debug)]
#[command(name = "certreg", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the registry snapshot file.
    #[arg(long, global = true, default_value = "certreg.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Bootstrap a fresh registry snapshot with an admin identity.
    Init(InitArgs),

    /// Issuer-set management (authorize, revoke, check).
    Issuer(IssuerArgs),

    /// Certificate lifecycle (issue, revoke, verify, show, list).
    Cert(CertArgs),

    /// Serve the HTTP API from the snapshot.
    Serve(ServeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Init(args) => run_init(&args, &cli.state),
        Commands::Issuer(args) => run_issuer(&args, &cli.state),
        Commands::Cert(args) => run_cert(&args, &cli.state),
        Commands::Serve(args) => run_serve(&args, &cli.state),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
