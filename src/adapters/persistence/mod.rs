//! Session state adapters. Implement ConversationPort.

pub mod memory_store;

pub use memory_store::{DEFAULT_HISTORY_WINDOW, InMemoryConversationStore};
