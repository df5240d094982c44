use std::future::{Future, pending};

use lib::queue::Dispatcher;
use tokio::{net::TcpListener, sync::watch};
use tracing::{error, info};

use crate::{connection::handle_connection, error::BoxError, http, state::ServerState};

/// Sockets the server listens on, bound by the caller.
pub struct Listeners {
    pub command: TcpListener,
    pub http: TcpListener,
}

/// # Errors
/// Fails if a listener address cannot be read or the HTTP server stops with an error.
pub async fn run(listeners: Listeners, dispatcher: Dispatcher) -> Result<(), BoxError> {
    run_until(listeners, dispatcher, pending::<()>()).await
}

/// Serves both listeners from one shared dispatcher until `shutdown` resolves.
///
/// # Errors
/// Fails if a listener address cannot be read or the HTTP server stops with an error.
pub async fn run_until(
    listeners: Listeners,
    dispatcher: Dispatcher,
    shutdown: impl Future<Output = ()> + Send,
) -> Result<(), BoxError> {
    let Listeners {
        command,
        http: http_listener,
    } = listeners;
    let command_addr = command.local_addr()?;
    let http_addr = http_listener.local_addr()?;
    let state = ServerState::new(dispatcher);
    tokio::pin!(shutdown);

    let (stop_tx, mut stop_rx) = watch::channel(false);
    let router = http::router(state.clone());
    let mut http_task = tokio::spawn(async move {
        axum::serve(http_listener, router)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.changed().await;
            })
            .await
    });

    info!("command listener on {}", command_addr);
    info!("http api listening on {}", http_addr);
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown signal received, stopping server accept loop");
                break;
            }
            http_result = &mut http_task => {
                error!("http api stopped unexpectedly");
                return match http_result {
                    Ok(result) => result.map_err(Into::into),
                    Err(err) => Err(err.into()),
                };
            }
            accept_result = command.accept() => {
                match accept_result {
                    Ok((stream, _)) => {
                        let state = state.clone();
                        tokio::spawn(async move {
                            if let Err(err) = handle_connection(stream, state).await {
                                error!("connection handling failed: {}", err);
                            }
                        });
                    }
                    Err(err) => {
                        error!("accept error: {}", err);
                    }
                }
            }
        }
    }

    let _ = stop_tx.send(true);
    http_task.await??;
    info!("http api stopped");
    Ok(())
}
