//! Handoff CLI
//!
//! Two commands, one per transfer direction:
//!
//! ```bash
//! handoff send-request <role> <unit>
//! handoff send-response <role> <unit>
//! ```
//!
//! The workspace root comes from `--root`, then the `HANDOFF_ROOT`
//! environment variable, then the current directory. Role and unit arrive as
//! plain strings and are validated by the library, so every validation
//! failure exits 1 with a message and a remediation hint rather than a clap
//! usage error.

use anyhow::Result;
use clap::{Parser, Subcommand};
use handoff::{send_request, send_response, Role, Transcript, UnitName, Workspace};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the workspace root
const ROOT_ENV: &str = "HANDOFF_ROOT";

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "handoff", version, about = "File-based planner/worker handoff protocol")]
struct Cli {
    /// Workspace root (defaults to $HANDOFF_ROOT, then the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send the planner's staged request to a worker role
    SendRequest {
        /// Worker role (dev, test, review, doc)
        role: String,
        /// Lifecycle unit name
        unit: String,
    },
    /// Send a worker's staged response back to the planner
    SendResponse {
        /// Worker role (dev, test, review, doc)
        role: String,
        /// Lifecycle unit name
        unit: String,
    },
}

fn resolve_root(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(root) = flag {
        return Ok(root);
    }
    if let Ok(root) = std::env::var(ROOT_ENV) {
        return Ok(PathBuf::from(root));
    }
    Ok(std::env::current_dir()?)
}

fn run(cli: Cli) -> Result<()> {
    let root = resolve_root(cli.root)?;
    let ws = Workspace::new(root);
    let mut transcript = Transcript::stdout();

    let (role, unit, receipt) = match cli.command {
        Command::SendRequest { role, unit } => {
            let role: Role = role.parse()?;
            let unit = UnitName::new(unit)?;
            let receipt = send_request(&ws, role, &unit, &mut transcript)?;
            (role, unit, receipt)
        }
        Command::SendResponse { role, unit } => {
            let role: Role = role.parse()?;
            let unit = UnitName::new(unit)?;
            let receipt = send_response(&ws, role, &unit, &mut transcript)?;
            (role, unit, receipt)
        }
    };

    tracing::debug!(%role, %unit, delivered_to = %receipt.delivered_to.display(), "transfer complete");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<handoff::HandoffError>() {
                Some(e) => eprintln!("✗ {}", e.with_remediation()),
                None => eprintln!("✗ {:#}", err),
            }
            ExitCode::from(1)
        }
    }
}
