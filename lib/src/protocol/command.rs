use std::fmt;

use serde::{Deserialize, Serialize};

use crate::queue::{ChatSession, QueueError, QueueStatus};

pub const PROTOCOL_VERSION: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Status,
    Add,
    End,
}

impl CommandKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CommandKind::Status => "status",
            CommandKind::Add => "add",
            CommandKind::End => "end",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator command sent to the server, one per frame.
///
/// `customer_name` is carried raw; validation happens server-side so that a bad
/// name comes back as an `invalid_input` rejection rather than a decode error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandRequest {
    Status {
        protocol_version: u16,
    },
    Add {
        protocol_version: u16,
        customer_name: String,
    },
    End {
        protocol_version: u16,
    },
}

impl CommandRequest {
    #[must_use]
    pub const fn status() -> Self {
        Self::Status {
            protocol_version: PROTOCOL_VERSION,
        }
    }

    #[must_use]
    pub fn add(customer_name: impl Into<String>) -> Self {
        Self::Add {
            protocol_version: PROTOCOL_VERSION,
            customer_name: customer_name.into(),
        }
    }

    #[must_use]
    pub const fn end() -> Self {
        Self::End {
            protocol_version: PROTOCOL_VERSION,
        }
    }

    #[must_use]
    pub const fn protocol_version(&self) -> u16 {
        match self {
            CommandRequest::Status { protocol_version }
            | CommandRequest::Add {
                protocol_version, ..
            }
            | CommandRequest::End { protocol_version } => *protocol_version,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            CommandRequest::Status { .. } => CommandKind::Status,
            CommandRequest::Add { .. } => CommandKind::Add,
            CommandRequest::End { .. } => CommandKind::End,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidInput,
    QueueFull,
    QueueEmpty,
    UnsupportedProtocolVersion,
    InvalidRequest,
    InternalError,
}

impl From<&QueueError> for ErrorCode {
    fn from(value: &QueueError) -> Self {
        match value {
            QueueError::InvalidInput(_) => ErrorCode::InvalidInput,
            QueueError::QueueFull { .. } => ErrorCode::QueueFull,
            QueueError::QueueEmpty => ErrorCode::QueueEmpty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandAccepted {
    pub protocol_version: u16,
    pub message: String,
    pub success: bool,
    pub chat: Option<ChatSession>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub protocol_version: u16,
    pub queue: QueueStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRejected {
    pub protocol_version: u16,
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandResponse {
    Ok(CommandAccepted),
    Snapshot(StatusSnapshot),
    Rejected(CommandRejected),
}

impl CommandResponse {
    #[must_use]
    pub fn accepted(message: impl Into<String>, chat: Option<ChatSession>) -> Self {
        Self::Ok(CommandAccepted {
            protocol_version: PROTOCOL_VERSION,
            message: message.into(),
            success: true,
            chat,
        })
    }

    #[must_use]
    pub fn snapshot(queue: QueueStatus) -> Self {
        Self::Snapshot(StatusSnapshot {
            protocol_version: PROTOCOL_VERSION,
            queue,
        })
    }

    #[must_use]
    pub fn rejected(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Rejected(CommandRejected {
            protocol_version: PROTOCOL_VERSION,
            code,
            message: message.into(),
        })
    }
}

/// Confirmation text for a newly admitted chat.
#[must_use]
pub fn added_message(chat: &ChatSession) -> String {
    format!("Chat request added for {}", chat.customer_name())
}

pub const ENDED_MESSAGE: &str = "Oldest chat ended";

/// Operator-facing text for a rejected command.
#[must_use]
pub fn error_message(err: &QueueError) -> String {
    format!("Error: {}", err)
}
