// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod plan;
pub mod supervise;

use tokio::sync::mpsc;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::{loader, StaticSecrets, TerminalPrompt};
use crate::errors::Result;
use crate::plan::Job;
use crate::supervise::{spawn_signal_listener, ShutdownSignal, Supervisor};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading + secret collection
/// - job planning
/// - signal listeners
/// - the supervisor run loop
pub async fn run(args: CliArgs) -> Result<()> {
    let doc = loader::load_from_path(&args.config_file_path)?;

    if args.dry_run {
        // Placeholder secrets: password-id validation is list membership,
        // and the printed plan never contains a secret value.
        let config = loader::resolve(&doc, &StaticSecrets::new())?;
        print_dry_run(&plan::plan(&config));
        return Ok(());
    }

    let config = loader::resolve(&doc, &TerminalPrompt)?;
    let jobs = plan::plan(&config);
    info!(jobs = jobs.len(), "fleet planned");

    // Listeners go in before any child is spawned, so a signal arriving
    // mid-launch cannot orphan a child.
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<ShutdownSignal>(4);
    spawn_signal_listener(shutdown_tx)?;

    Supervisor::new().run(jobs, shutdown_rx).await
}

/// Simple dry-run output: one block per planned job.
fn print_dry_run(jobs: &[Job]) {
    println!("trsync-fleet dry-run");
    println!("jobs ({}):", jobs.len());
    for job in jobs {
        println!("  - {}", job.pair());
        println!("      cmd: {}", job.command_line());
        println!("      log: {}", job.log_file_path.display());
    }
}
