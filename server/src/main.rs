use clap::Parser;
use switchboard_server::{BoxError, Listeners, ServerConfig, shutdown_signal};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::parse();
    let dispatcher = config.build_dispatcher()?;
    info!(
        "queue capacity {}, {} agents in rotation",
        config.capacity,
        config.agents.len()
    );

    let listeners = Listeners {
        command: TcpListener::bind(config.command_addr).await?,
        http: TcpListener::bind(config.http_addr).await?,
    };
    switchboard_server::run_until(listeners, dispatcher, shutdown_signal()).await
}
