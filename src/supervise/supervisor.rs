// src/supervise/supervisor.rs

use std::fs::OpenOptions;
use std::process::Stdio;

use anyhow::Context;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::errors::Result;
use crate::plan::Job;
use crate::supervise::signals::ShutdownSignal;

/// A launched worker: the identity of its (instance, workspace) pair
/// plus the live OS process handle. The child keeps its log file
/// descriptor for as long as it runs; confirming its exit is what
/// releases everything.
struct RunningChild {
    pair: String,
    child: Child,
}

/// Owns every live child handle for the whole run.
///
/// The registry is an explicit, supervisor-owned list (never a global),
/// so the shutdown path is reachable from tests by feeding a synthetic
/// [`ShutdownSignal`] through the same channel a real signal would use.
#[derive(Default)]
pub struct Supervisor {
    children: Vec<RunningChild>,
}

impl Supervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of children currently recorded in the registry.
    pub fn running_count(&self) -> usize {
        self.children.len()
    }

    /// Launch every job in order, then block until a shutdown request
    /// arrives, then gracefully stop the whole fleet.
    ///
    /// The shutdown channel is checked before every launch: once a
    /// signal has been received, no further job is spawned and the
    /// children already running go straight through the shutdown path.
    ///
    /// A spawn failure for job k is fatal: no job after k is attempted,
    /// jobs 0..k-1 are stopped through the regular shutdown path, and
    /// the error propagates.
    pub async fn run(
        mut self,
        jobs: Vec<Job>,
        mut shutdown_rx: mpsc::Receiver<ShutdownSignal>,
    ) -> Result<()> {
        for job in jobs {
            if let Ok(signal) = shutdown_rx.try_recv() {
                println!("Stop required ({signal}) ...");
                self.stop_all().await;
                return Ok(());
            }
            if let Err(err) = self.launch(job) {
                self.stop_all().await;
                return Err(err);
            }
        }

        // No work happens here; the wait wakes on the signal event.
        match shutdown_rx.recv().await {
            Some(signal) => println!("Stop required ({signal}) ..."),
            None => warn!("shutdown channel closed without a signal; stopping fleet"),
        }

        self.stop_all().await;
        Ok(())
    }

    /// Launch one job: open its log file in append mode, announce the
    /// start, spawn the worker with stdout and stderr redirected to the
    /// log and the job's environment applied, and record the handle.
    ///
    /// Launches are strictly sequential; the announcement for job k is
    /// printed before job k+1 begins.
    pub fn launch(&mut self, job: Job) -> Result<()> {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&job.log_file_path)
            .with_context(|| {
                format!(
                    "opening log file {} for {}",
                    job.log_file_path.display(),
                    job.pair()
                )
            })?;
        let stderr_file = log_file
            .try_clone()
            .with_context(|| format!("duplicating log handle for {}", job.pair()))?;

        println!(
            "Start sync for : {} (\"{}\") and log into {}",
            job.pair(),
            job.command_line(),
            job.log_file_path.display()
        );

        let mut command = Command::new(&job.argv[0]);
        command
            .args(&job.argv[1..])
            .env_clear()
            .envs(&job.env)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log_file))
            .stderr(Stdio::from(stderr_file));

        let child = command
            .spawn()
            .with_context(|| format!("spawning worker '{}' for {}", job.argv[0], job.pair()))?;

        info!(pair = %job.pair(), pid = ?child.id(), "worker started");
        self.children.push(RunningChild {
            pair: job.pair(),
            child,
        });
        Ok(())
    }

    /// Gracefully stop every recorded child, in launch order: SIGTERM,
    /// then wait for that specific child's exit before moving on.
    ///
    /// The wait is unbounded. Draining the registry makes a second
    /// invocation a no-op, so an overlapping shutdown request cannot
    /// double-release a handle.
    pub async fn stop_all(&mut self) {
        for mut running in self.children.drain(..) {
            if let Some(pid) = running.child.id() {
                if let Err(err) = kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
                    warn!(pair = %running.pair, pid, error = %err, "failed to deliver SIGTERM");
                }
            }
            match running.child.wait().await {
                Ok(status) => info!(pair = %running.pair, %status, "worker stopped"),
                Err(err) => {
                    warn!(pair = %running.pair, error = %err, "error while waiting for worker exit")
                }
            }
        }
    }
}
