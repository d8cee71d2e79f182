// src/supervise/signals.rs

use std::fmt;

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tracing::debug;

use crate::errors::Result;

/// The three recognized shutdown signals. All map to the same graceful
/// group-shutdown transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Quit,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShutdownSignal::Interrupt => "SIGINT",
            ShutdownSignal::Quit => "SIGQUIT",
            ShutdownSignal::Terminate => "SIGTERM",
        };
        f.write_str(name)
    }
}

/// Install listeners for SIGINT, SIGQUIT and SIGTERM, forwarding each
/// occurrence onto `shutdown_tx`.
///
/// Must be called before any child is spawned, so a signal arriving
/// mid-launch cannot orphan a child. The listener keeps forwarding
/// further signals; once the supervisor has dropped its receiver the
/// listener task ends.
pub fn spawn_signal_listener(shutdown_tx: mpsc::Sender<ShutdownSignal>) -> Result<()> {
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut quit = signal(SignalKind::quit())?;
    let mut terminate = signal(SignalKind::terminate())?;

    tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                _ = interrupt.recv() => ShutdownSignal::Interrupt,
                _ = quit.recv() => ShutdownSignal::Quit,
                _ = terminate.recv() => ShutdownSignal::Terminate,
            };
            debug!(signal = %received, "shutdown signal received");
            if shutdown_tx.send(received).await.is_err() {
                // Receiver gone: shutdown already under way.
                return;
            }
        }
    });

    Ok(())
}
