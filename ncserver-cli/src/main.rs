//! NETCONF server configuration tool.
//!
//! Replays recorded configuration commits against an in-memory server and
//! inspects the credential data the SSH transport would see.
//!
//! Usage:
//!   ncserver replay commits.json
//!   ncserver users
//!   ncserver host-key genkey --tree running.json
//!   ncserver check-key alice --key "ssh-rsa AAAA..."

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ncserver_credentials::AuthDecision;
use ncserver_reconcile::ReconcileConfig;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "ncserver")]
#[command(about = "NETCONF server configuration replay and credential inspection")]
struct Args {
    /// Credential configuration (JSON)
    #[arg(long, global = true)]
    credentials: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print accounts and their authorized keys
    Users,

    /// Resolve a configured host key by name
    HostKey {
        name: String,

        /// Configuration tree (JSON)
        #[arg(short, long)]
        tree: PathBuf,
    },

    /// Check a public key offer for a user
    CheckKey {
        user: String,

        /// Key in authorized_keys format
        #[arg(short, long)]
        key: String,
    },

    /// Replay recorded commits against an in-memory server
    Replay {
        file: PathBuf,

        /// Engine configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();

    let credentials = ncserver_cli::credential_config(args.credentials.as_deref())?;

    match args.command {
        Command::Users => print_json(&serde_json::json!({
            "users": ncserver_cli::users(&credentials)?
        })),
        Command::HostKey { name, tree } => {
            print_json(&ncserver_cli::host_key(&credentials, &tree, &name)?)
        }
        Command::CheckKey { user, key } => {
            match ncserver_cli::check_key(&credentials, &user, &key)? {
                AuthDecision::Accept => {
                    println!("accept");
                    Ok(())
                }
                AuthDecision::Reject => bail!("Key rejected for \"{}\"", user),
            }
        }
        Command::Replay { file, config } => {
            let config = match config {
                Some(path) => ReconcileConfig::load(&path)
                    .with_context(|| format!("Failed to load engine config {}", path.display()))?,
                None => ReconcileConfig::default(),
            };
            let steps = ncserver_cli::load_steps(&file)?;
            info!("Replaying {} steps from {}", steps.len(), file.display());

            let report = ncserver_cli::replay(&steps, config);
            print_json(&report)?;
            if let Some(failure) = report.failure {
                bail!("Step {} failed ({}): {}", failure.step, failure.code, failure.message);
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
