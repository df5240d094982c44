use std::num::NonZeroUsize;

use chrono::Local;

use super::{
    chat::ChatSession,
    error::QueueError,
    ids::{AgentName, ChatId, CustomerName},
};

/// Point-in-time copy of the queue contents, oldest chat first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSnapshot {
    pub chats: Vec<ChatSession>,
    pub occupancy: usize,
    pub capacity: usize,
}

/// Fixed-capacity ring buffer of active chats.
///
/// Slots are allocated once at construction. `head` indexes the oldest chat and
/// the `len` slots following it (modulo capacity) are occupied; every other slot
/// is `None`. Chat ids come from a counter that only moves forward, so an id is
/// never handed out twice even after its chat has been evicted.
#[derive(Debug)]
pub struct ChatQueue {
    slots: Vec<Option<ChatSession>>,
    head: usize,
    len: usize,
    next_id: u64,
}

impl ChatQueue {
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        let mut slots = Vec::with_capacity(capacity.get());
        slots.resize_with(capacity.get(), || None);
        Self {
            slots,
            head: 0,
            len: 0,
            next_id: 1,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Appends a new chat at the tail.
    ///
    /// The customer name is taken as already validated.
    ///
    /// # Errors
    /// Returns [`QueueError::QueueFull`] when every slot is occupied.
    pub fn admit(
        &mut self,
        customer_name: CustomerName,
        agent_name: AgentName,
    ) -> Result<ChatSession, QueueError> {
        if self.is_full() {
            return Err(QueueError::QueueFull {
                capacity: self.capacity(),
            });
        }

        let id = ChatId(self.next_id);
        self.next_id += 1;
        let chat = ChatSession::new(id, customer_name, agent_name, Local::now());

        let tail = (self.head + self.len) % self.capacity();
        assert!(
            self.slots[tail].is_none(),
            "ring slot {} already occupied (head={}, len={})",
            tail,
            self.head,
            self.len
        );
        self.slots[tail] = Some(chat.clone());
        self.len += 1;
        assert!(
            self.len <= self.capacity(),
            "occupancy {} exceeds capacity {}",
            self.len,
            self.capacity()
        );

        Ok(chat)
    }

    /// Removes and returns the oldest chat.
    ///
    /// # Errors
    /// Returns [`QueueError::QueueEmpty`] when there is nothing to remove.
    ///
    /// # Panics
    /// Panics if the head slot is vacant while the queue reports occupancy,
    /// which means the ring has been corrupted.
    pub fn evict_oldest(&mut self) -> Result<ChatSession, QueueError> {
        if self.is_empty() {
            return Err(QueueError::QueueEmpty);
        }

        let Some(chat) = self.slots[self.head].take() else {
            unreachable!(
                "ring head slot {} is empty with occupancy {}",
                self.head, self.len
            );
        };
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;
        if self.len == 0 {
            self.head = 0;
        }

        Ok(chat)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatSession> {
        let capacity = self.capacity();
        (0..self.len).filter_map(move |offset| self.slots[(self.head + offset) % capacity].as_ref())
    }

    #[must_use]
    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            chats: self.iter().cloned().collect(),
            occupancy: self.len,
            capacity: self.capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::ChatQueue;
    use crate::queue::{
        error::QueueError,
        ids::{AgentName, ChatId, CustomerName},
    };

    fn queue(capacity: usize) -> ChatQueue {
        ChatQueue::new(NonZeroUsize::new(capacity).expect("non-zero capacity"))
    }

    fn admit(queue: &mut ChatQueue, customer: &str) -> Result<ChatId, QueueError> {
        queue
            .admit(
                CustomerName::new(customer).expect("valid customer"),
                AgentName::new("Agent Alice").expect("valid agent"),
            )
            .map(|chat| chat.id())
    }

    fn ids(queue: &ChatQueue) -> Vec<u64> {
        queue.iter().map(|chat| chat.id().0).collect()
    }

    #[test]
    fn rejects_admission_at_capacity() {
        let mut queue = queue(3);
        for name in ["a", "b", "c"] {
            admit(&mut queue, name).expect("slot available");
        }
        assert!(queue.is_full());

        let err = admit(&mut queue, "d").expect_err("queue is full");
        assert_eq!(err, QueueError::QueueFull { capacity: 3 });
        assert_eq!(queue.len(), 3);
        assert_eq!(ids(&queue), vec![1, 2, 3]);
    }

    #[test]
    fn evicting_empty_queue_fails() {
        let mut queue = queue(2);
        assert_eq!(queue.evict_oldest(), Err(QueueError::QueueEmpty));
        assert!(queue.iter().next().is_none());
    }

    #[test]
    fn evicts_in_admission_order_across_wraparound() {
        let mut queue = queue(3);
        for name in ["a", "b", "c"] {
            admit(&mut queue, name).expect("slot available");
        }
        assert_eq!(queue.evict_oldest().map(|chat| chat.id().0), Ok(1));
        assert_eq!(queue.evict_oldest().map(|chat| chat.id().0), Ok(2));

        // tail wraps to slot 0 and 1 while head sits at slot 2
        admit(&mut queue, "d").expect("slot available");
        admit(&mut queue, "e").expect("slot available");
        assert_eq!(ids(&queue), vec![3, 4, 5]);
        assert_eq!(queue.iter().next().map(|chat| chat.id().0), Some(3));

        let drained: Vec<u64> = std::iter::from_fn(|| queue.evict_oldest().ok())
            .map(|chat| chat.id().0)
            .collect();
        assert_eq!(drained, vec![3, 4, 5]);
        assert!(queue.is_empty());
    }

    #[test]
    fn ids_are_never_reused_after_eviction() {
        let mut queue = queue(1);
        let mut seen = Vec::new();
        for round in 0..5 {
            let id = admit(&mut queue, &format!("customer-{}", round)).expect("slot available");
            seen.push(id.0);
            queue.evict_oldest().expect("one chat present");
        }
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn snapshot_does_not_mutate() {
        let mut queue = queue(4);
        admit(&mut queue, "a").expect("slot available");
        admit(&mut queue, "b").expect("slot available");

        let first = queue.snapshot();
        let second = queue.snapshot();
        assert_eq!(first, second);
        assert_eq!(first.occupancy, 2);
        assert_eq!(first.capacity, 4);
        assert_eq!(queue.len(), 2);
    }
}
