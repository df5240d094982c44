use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use lib::queue::{ChatSession, Dispatcher, QueueError, QueueStatus};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// State shared by the command listener and the HTTP API.
///
/// Every mutation takes the write guard for the whole dispatcher call, so the
/// capacity check, agent pick and insertion happen as one step. Status reads
/// share the read guard.
#[derive(Clone)]
pub(crate) struct ServerState {
    dispatcher: Arc<RwLock<Dispatcher>>,
    connections: Arc<AtomicU64>,
}

impl ServerState {
    pub(crate) fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(RwLock::new(dispatcher)),
            connections: Arc::new(AtomicU64::new(1)),
        }
    }

    pub(crate) fn next_connection_id(&self) -> u64 {
        self.connections.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) async fn add_chat(&self, customer_name: &str) -> Result<ChatSession, QueueError> {
        let result = self.dispatcher.write().await.add_chat(customer_name);
        match &result {
            Ok(chat) => info!(
                "chat {} admitted for '{}', assigned to {}",
                chat.id(),
                chat.customer_name(),
                chat.agent_name()
            ),
            Err(err) => warn!("add chat rejected: {}", err),
        }
        result
    }

    pub(crate) async fn end_chat(&self) -> Result<ChatSession, QueueError> {
        let result = self.dispatcher.write().await.end_chat();
        match &result {
            Ok(chat) => info!(
                "chat {} for '{}' ended (agent {})",
                chat.id(),
                chat.customer_name(),
                chat.agent_name()
            ),
            Err(err) => warn!("end chat rejected: {}", err),
        }
        result
    }

    pub(crate) async fn status(&self) -> QueueStatus {
        self.dispatcher.read().await.status()
    }
}
