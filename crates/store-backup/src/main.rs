//! Store backup CLI
//!
//! ```bash
//! store-backup --store app.sqlite backup
//! store-backup --store app.sqlite list
//! store-backup --store app.sqlite restore --latest --yes
//! store-backup --store app.sqlite restore store_backup_20260806_101530.sqlite --yes
//! ```
//!
//! The backup directory defaults to `backups/` next to the store file.
//! Restore overwrites the live store, so it refuses to run without `--yes`
//! (a pre-restore snapshot is still taken, making even a confirmed restore
//! undoable).

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use store_backup::BackupSet;
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "store-backup", version, about = "Backup and restore a single state-store file")]
struct Cli {
    /// Path to the live store file
    #[arg(long)]
    store: PathBuf,

    /// Backup directory (defaults to `backups/` next to the store)
    #[arg(long)]
    backup_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a timestamped backup of the store
    Backup,
    /// List available backups, newest first
    List,
    /// Replace the store with a backup (snapshots the current store first)
    Restore {
        /// Backup file name from `list`; omit with --latest
        name: Option<String>,
        /// Restore the most recent backup
        #[arg(long)]
        latest: bool,
        /// Confirm the overwrite of the live store
        #[arg(long)]
        yes: bool,
    },
}

fn run(cli: Cli) -> Result<()> {
    let backup_dir = cli.backup_dir.unwrap_or_else(|| {
        cli.store
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("backups")
    });
    let set = BackupSet::new(&cli.store, backup_dir);

    match cli.command {
        Command::Backup => {
            let backup = set.create_backup()?;
            println!("✓ created backup: {}", backup.display());
        }
        Command::List => {
            let entries = set.list()?;
            if entries.is_empty() {
                println!("no backups in {}", set.backup_dir().display());
                return Ok(());
            }
            for entry in entries {
                println!(
                    "{}  {}  {:.2} MB",
                    entry.file_name,
                    entry.modified.format("%Y-%m-%d %H:%M:%S"),
                    entry.size_mb()
                );
            }
        }
        Command::Restore { name, latest, yes } => {
            if !yes {
                bail!(
                    "restore overwrites {}; re-run with --yes to confirm",
                    cli.store.display()
                );
            }
            let receipt = match (name, latest) {
                (Some(name), false) => set.restore(&set.backup_dir().join(name))?,
                (None, true) => set.restore_latest()?,
                (Some(_), true) => bail!("pass either a backup name or --latest, not both"),
                (None, false) => bail!("pass a backup name from `list`, or --latest"),
            };
            if let Some(snapshot) = &receipt.pre_restore_snapshot {
                println!("✓ snapshotted previous state: {}", snapshot.display());
            }
            println!("✓ restored from {}", receipt.restored_from.display());
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("✗ {:#}", err);
            ExitCode::from(1)
        }
    }
}
