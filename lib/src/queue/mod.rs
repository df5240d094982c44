//! Bounded chat queue with round-robin agent dispatch.
//!
//! [`Dispatcher`] is the entry point: it validates customer names, admits chats
//! into the fixed-capacity [`ChatQueue`] and draws agents from the [`AgentPool`].
//! [`QueueStatus`] is the read-only view served to operators.

mod agents;
mod chat;
mod dispatcher;
mod error;
mod ids;
mod ring;
mod status;

pub use agents::AgentPool;
pub use chat::ChatSession;
pub use dispatcher::Dispatcher;
pub use error::{AgentPoolError, QueueError};
pub use ids::{AgentName, ChatId, CustomerName, NameError, NameErrorKind};
pub use ring::{ChatQueue, QueueSnapshot};
pub use status::{QueueStatus, project};
