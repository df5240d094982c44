use std::{error::Error, fmt};

use super::ids::NameError;

/// Expected, recoverable rejections from the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    InvalidInput(NameError),
    QueueFull { capacity: usize },
    QueueEmpty,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::InvalidInput(err) => write!(f, "{}", err),
            QueueError::QueueFull { .. } => f.write_str("Queue is full"),
            QueueError::QueueEmpty => f.write_str("No active chats to end"),
        }
    }
}

impl Error for QueueError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            QueueError::InvalidInput(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NameError> for QueueError {
    fn from(value: NameError) -> Self {
        QueueError::InvalidInput(value)
    }
}

/// Startup-time problems with the configured agent roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentPoolError {
    Empty,
    InvalidName(NameError),
    Duplicate(String),
}

impl fmt::Display for AgentPoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentPoolError::Empty => f.write_str("agent pool must contain at least one agent"),
            AgentPoolError::InvalidName(err) => write!(f, "invalid agent: {}", err),
            AgentPoolError::Duplicate(name) => {
                write!(f, "agent '{}' is listed more than once", name)
            }
        }
    }
}

impl Error for AgentPoolError {}

impl From<NameError> for AgentPoolError {
    fn from(value: NameError) -> Self {
        AgentPoolError::InvalidName(value)
    }
}
