use tracing::{info, warn};

/// Resolves on Ctrl+C, or on SIGTERM where the platform has it.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = match signal(SignalKind::terminate()) {
            Ok(terminate) => Some(terminate),
            Err(err) => {
                warn!("failed to install SIGTERM handler: {}", err);
                None
            }
        };
        let sigterm = async {
            match terminate.as_mut() {
                Some(terminate) => {
                    terminate.recv().await;
                }
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            signal_result = tokio::signal::ctrl_c() => log_ctrl_c(signal_result),
            () = sigterm => {
                info!("received SIGTERM");
            }
        }
    }

    #[cfg(not(unix))]
    {
        log_ctrl_c(tokio::signal::ctrl_c().await);
    }
}

fn log_ctrl_c(result: std::io::Result<()>) {
    match result {
        Ok(()) => info!("received Ctrl+C"),
        Err(err) => warn!("failed to listen for Ctrl+C: {}", err),
    }
}
