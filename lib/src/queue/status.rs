use serde::{Deserialize, Serialize};

use super::{agents::AgentPool, chat::ChatSession, ids::AgentName, ring::ChatQueue};

/// Wire shape of the queue status shown to operators and dashboards.
///
/// `chats` is ordered oldest first, so the first entry is the chat the next
/// `end` will remove. `agents` is the full roster, not just agents with chats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStatus {
    pub total_chats: usize,
    pub capacity: usize,
    pub chats: Vec<ChatSession>,
    pub agents: Vec<AgentName>,
}

impl QueueStatus {
    #[must_use]
    pub fn next_to_end(&self) -> Option<&ChatSession> {
        self.chats.first()
    }
}

#[must_use]
pub fn project(queue: &ChatQueue, pool: &AgentPool) -> QueueStatus {
    let snapshot = queue.snapshot();
    QueueStatus {
        total_chats: snapshot.occupancy,
        capacity: snapshot.capacity,
        chats: snapshot.chats,
        agents: pool.agents().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::project;
    use crate::queue::{
        agents::AgentPool,
        ids::{AgentName, CustomerName},
        ring::ChatQueue,
    };

    #[test]
    fn status_lists_roster_and_chats_in_order() {
        let mut queue = ChatQueue::new(NonZeroUsize::new(5).expect("non-zero"));
        let pool = AgentPool::new(["A", "B", "C"]).expect("valid pool");
        for customer in ["first", "second"] {
            queue
                .admit(
                    CustomerName::new(customer).expect("valid customer"),
                    AgentName::new("A").expect("valid agent"),
                )
                .expect("slot available");
        }

        let status = project(&queue, &pool);
        assert_eq!(status.total_chats, 2);
        assert_eq!(status.capacity, 5);
        assert_eq!(status.agents.len(), 3);
        assert_eq!(
            status.next_to_end().map(|chat| chat.customer_name().as_str()),
            Some("first")
        );

        let json = serde_json::to_value(&status).expect("serialize status");
        assert_eq!(json["totalChats"], 2);
        assert_eq!(json["agents"], serde_json::json!(["A", "B", "C"]));
        assert_eq!(json["chats"][1]["customerName"], "second");
    }
}
