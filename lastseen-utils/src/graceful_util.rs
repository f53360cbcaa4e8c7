use std::sync::Arc;

use tokio::{signal, sync::Notify};

/// Spawn a task waiting for ctrl+c or SIGTERM, then wake whoever awaits
/// `wait_for_shutdown` on the same notify.
pub fn graceful_shutdown(notify_signal: Arc<Notify>) {
    tokio::spawn(async move {
        if let Err(e) = shutdown_signal().await {
            tracing::error!("shutdown signal error: {:?}", e);
        }
        tracing::info!("Shutdown signal received, draining in-flight requests...");

        // notify_one stores a permit, so a waiter registered later still wakes up.
        notify_signal.notify_one();
    });
}

/// Wait for shutdown notification
pub async fn wait_for_shutdown(notify: Arc<Notify>) {
    notify.notified().await;
}

/// Handles OS signals (Ctrl+C or SIGTERM)
async fn shutdown_signal() -> Result<(), std::io::Error> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        let ctrl_c = signal::ctrl_c();

        tokio::select! {
            _ = ctrl_c => {
                tracing::info!("Signal ctrl+c received...")
            },
            _ = sigterm.recv() => {
                tracing::info!("Signal sigterm received...")
            },
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await?;
    }

    Ok(())
}
