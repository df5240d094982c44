mod accept_loop;
mod config;
mod connection;
mod error;
mod http;
mod responses;
mod signal;
mod state;

pub use accept_loop::{Listeners, run, run_until};
pub use config::{ConfigError, ServerConfig};
pub use error::BoxError;
pub use signal::shutdown_signal;
