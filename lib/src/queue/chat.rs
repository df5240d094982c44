use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::ids::{AgentName, ChatId, CustomerName};
use crate::constants::TIMESTAMP_FORMAT;

/// An active chat between a customer and the agent it was dispatched to.
///
/// Sessions are immutable: the queue creates them on admission and drops them on
/// eviction. Everything outside the queue only ever sees clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    id: ChatId,
    customer_name: CustomerName,
    agent_name: AgentName,
    timestamp: String,
}

impl ChatSession {
    pub(crate) fn new(
        id: ChatId,
        customer_name: CustomerName,
        agent_name: AgentName,
        created_at: DateTime<Local>,
    ) -> Self {
        Self {
            id,
            customer_name,
            agent_name,
            timestamp: created_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> ChatId {
        self.id
    }

    #[must_use]
    pub const fn customer_name(&self) -> &CustomerName {
        &self.customer_name
    }

    #[must_use]
    pub const fn agent_name(&self) -> &AgentName {
        &self.agent_name
    }

    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}
