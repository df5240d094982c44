use std::{error::Error, fmt, net::SocketAddr, num::NonZeroUsize};

use clap::Parser;
use lib::{
    constants::{DEFAULT_AGENTS, DEFAULT_CAPACITY, DEFAULT_COMMAND_PORT, DEFAULT_HTTP_PORT},
    queue::{AgentPool, AgentPoolError, Dispatcher},
};

#[derive(Debug, Clone, Parser)]
#[command(name = "switchboard-server", version, about = "Chat queue dispatch server")]
pub struct ServerConfig {
    /// Address for the framed operator command protocol.
    #[arg(long, env = "SWITCHBOARD_COMMAND_ADDR", default_value_t = default_command_addr())]
    pub command_addr: SocketAddr,

    /// Address for the HTTP status API.
    #[arg(long, env = "SWITCHBOARD_HTTP_ADDR", default_value_t = default_http_addr())]
    pub http_addr: SocketAddr,

    /// Maximum number of concurrently active chats.
    #[arg(long, env = "SWITCHBOARD_CAPACITY", default_value_t = default_capacity())]
    pub capacity: NonZeroUsize,

    /// Agent roster in rotation order.
    #[arg(
        long = "agent",
        env = "SWITCHBOARD_AGENTS",
        value_delimiter = ',',
        default_values_t = DEFAULT_AGENTS.map(String::from)
    )]
    pub agents: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            command_addr: default_command_addr(),
            http_addr: default_http_addr(),
            capacity: default_capacity(),
            agents: DEFAULT_AGENTS.map(String::from).to_vec(),
        }
    }
}

impl ServerConfig {
    /// # Errors
    /// Returns [`ConfigError`] when the agent roster is unusable.
    pub fn build_dispatcher(&self) -> Result<Dispatcher, ConfigError> {
        let pool = AgentPool::new(&self.agents)?;
        Ok(Dispatcher::new(self.capacity, pool))
    }
}

fn default_command_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], DEFAULT_COMMAND_PORT))
}

fn default_http_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], DEFAULT_HTTP_PORT))
}

const fn default_capacity() -> NonZeroUsize {
    match NonZeroUsize::new(DEFAULT_CAPACITY) {
        Some(capacity) => capacity,
        None => NonZeroUsize::MIN,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Agents(AgentPoolError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Agents(err) => write!(f, "invalid agent configuration: {}", err),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Agents(err) => Some(err),
        }
    }
}

impl From<AgentPoolError> for ConfigError {
    fn from(value: AgentPoolError) -> Self {
        ConfigError::Agents(value)
    }
}
