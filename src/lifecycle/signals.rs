//! OS signal handling.
//!
//! SIGINT and SIGTERM both trigger a graceful stop of watch mode.

use std::future::Future;

use crate::lifecycle::shutdown::Shutdown;

/// Wait for SIGINT or SIGTERM.
pub async fn wait_for_signal() -> std::io::Result<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut term = signal(SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res.map(|_| "SIGINT"),
            _ = term.recv() => Ok("SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.map(|_| "ctrl-c")
    }
}

/// Spawn a task that triggers `shutdown` on the first signal.
pub fn spawn_signal_handler(shutdown: Shutdown) {
    tokio::spawn(forward_signal(shutdown, wait_for_signal()));
}

/// Trigger `shutdown` once `signal` resolves. If listening fails the
/// coordinator is held forever, so subscribers never see a closed channel.
async fn forward_signal<F>(shutdown: Shutdown, signal: F)
where
    F: Future<Output = std::io::Result<&'static str>>,
{
    match signal.await {
        Ok(signal) => {
            tracing::info!(signal, "Shutdown signal received");
            shutdown.trigger();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signals");
            std::future::pending::<()>().await;
            drop(shutdown);
        }
    }
}
