//! OS signal handling: turn termination signals into `Message::Quit`

use tokio::sync::mpsc;
use tracelens_core::prelude::*;

use crate::message::Message;

/// Signal that ended the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
    /// Controlling terminal went away.
    Hangup,
}

impl ShutdownSignal {
    pub fn name(self) -> &'static str {
        match self {
            ShutdownSignal::Interrupt => "SIGINT",
            ShutdownSignal::Terminate => "SIGTERM",
            ShutdownSignal::Hangup => "SIGHUP",
        }
    }
}

/// Spawn a task that waits for the first shutdown signal and asks the UI
/// loop to quit. Raw mode swallows Ctrl+C as a key, so this mostly fires on
/// `kill` or a closed terminal.
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        match wait_for_signal().await {
            Ok(signal) => {
                info!("Received {}, quitting", signal.name());
                if tx.send(Message::Quit).await.is_err() {
                    debug!("UI loop already gone");
                }
            }
            Err(e) => warn!("Signal handling disabled: {}", e),
        }
    });
}

#[cfg(unix)]
async fn wait_for_signal() -> Result<ShutdownSignal> {
    use tokio::signal::unix::{signal, SignalKind};

    let listen = |kind: SignalKind, name: &str| {
        signal(kind).map_err(|e| Error::terminal(format!("cannot listen for {}: {}", name, e)))
    };
    let mut sigint = listen(SignalKind::interrupt(), "SIGINT")?;
    let mut sigterm = listen(SignalKind::terminate(), "SIGTERM")?;
    let mut sighup = listen(SignalKind::hangup(), "SIGHUP")?;

    let signal = tokio::select! {
        _ = sigint.recv() => ShutdownSignal::Interrupt,
        _ = sigterm.recv() => ShutdownSignal::Terminate,
        _ = sighup.recv() => ShutdownSignal::Hangup,
    };
    Ok(signal)
}

#[cfg(not(unix))]
async fn wait_for_signal() -> Result<ShutdownSignal> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| Error::terminal(format!("cannot listen for Ctrl+C: {}", e)))?;
    Ok(ShutdownSignal::Interrupt)
}
