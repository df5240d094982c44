use std::num::NonZeroUsize;

use super::{
    agents::AgentPool,
    chat::ChatSession,
    error::QueueError,
    ids::CustomerName,
    ring::ChatQueue,
    status::{QueueStatus, project},
};

/// Owns the queue and the agent rotation and keeps them in step.
///
/// Callers must serialize `&mut self` access; the server does so by holding the
/// dispatcher behind a single lock.
#[derive(Debug)]
pub struct Dispatcher {
    queue: ChatQueue,
    pool: AgentPool,
}

impl Dispatcher {
    #[must_use]
    pub fn new(capacity: NonZeroUsize, pool: AgentPool) -> Self {
        Self {
            queue: ChatQueue::new(capacity),
            pool,
        }
    }

    /// Admits a chat for `customer_name` and assigns it the next agent.
    ///
    /// Capacity is checked before the rotation moves, so a rejected request never
    /// uses up an agent's turn.
    ///
    /// # Errors
    /// [`QueueError::InvalidInput`] for a blank or over-long name,
    /// [`QueueError::QueueFull`] when no slot is free.
    pub fn add_chat(&mut self, customer_name: &str) -> Result<ChatSession, QueueError> {
        let customer_name = CustomerName::new(customer_name)?;
        if self.queue.is_full() {
            return Err(QueueError::QueueFull {
                capacity: self.queue.capacity(),
            });
        }

        let agent = self.pool.next_agent();
        self.queue.admit(customer_name, agent)
    }

    /// Ends the oldest active chat.
    ///
    /// # Errors
    /// [`QueueError::QueueEmpty`] when no chat is active.
    pub fn end_chat(&mut self) -> Result<ChatSession, QueueError> {
        self.queue.evict_oldest()
    }

    #[must_use]
    pub fn status(&self) -> QueueStatus {
        project(&self.queue, &self.pool)
    }
}
