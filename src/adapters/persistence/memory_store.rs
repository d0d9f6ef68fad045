//! Implements ConversationPort in process memory.
//!
//! One bounded turn list per session id. The map lock is held only to find or create a
//! session; each session has its own mutex, so appends to different sessions never wait on
//! each other and an append to one session is a single atomic read-modify-write.

use crate::domain::ConversationTurn;
use crate::ports::ConversationPort;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Default number of turns kept per session.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

type Session = Arc<Mutex<VecDeque<ConversationTurn>>>;

/// In-memory conversation store. Lives for the process lifetime; no expiry.
pub struct InMemoryConversationStore {
    window: usize,
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_HISTORY_WINDOW)
    }

    /// Store keeping the `window` most recent turns per session (at least one).
    pub fn with_window(window: usize) -> Self {
        Self {
            window: window.max(1),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of sessions seen so far.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn session(&self, session_id: &str) -> Session {
        if let Some(session) = self.sessions.read().await.get(session_id) {
            return Arc::clone(session);
        }
        let mut sessions = self.sessions.write().await;
        Arc::clone(sessions.entry(session_id.to_string()).or_default())
    }
}

impl Default for InMemoryConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ConversationPort for InMemoryConversationStore {
    async fn append(&self, session_id: &str, turn: ConversationTurn) {
        let session = self.session(session_id).await;
        let mut turns = session.lock().await;
        turns.push_back(turn);
        while turns.len() > self.window {
            turns.pop_front();
        }
        debug!(session_id, turns = turns.len(), "turn appended");
    }

    async fn history(&self, session_id: &str) -> Vec<ConversationTurn> {
        let session = match self.sessions.read().await.get(session_id) {
            Some(s) => Arc::clone(s),
            None => return Vec::new(),
        };
        let turns = session.lock().await;
        turns.iter().cloned().collect()
    }

    async fn reset(&self, session_id: &str) {
        let session = self.sessions.read().await.get(session_id).cloned();
        if let Some(session) = session {
            session.lock().await.clear();
        }
        debug!(session_id, "session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_window_drops_oldest() {
        let store = InMemoryConversationStore::new();
        for i in 1..=11 {
            store
                .append("s1", ConversationTurn::user(format!("turn {}", i)))
                .await;
        }
        let history = store.history("s1").await;
        assert_eq!(history.len(), 10);
        let contents: Vec<_> = history.iter().map(|t| t.content.as_str()).collect();
        let expected: Vec<String> = (2..=11).map(|i| format!("turn {}", i)).collect();
        assert_eq!(contents, expected);
    }

    #[tokio::test]
    async fn test_window_can_split_a_pair() {
        let store = InMemoryConversationStore::with_window(3);
        store.append("s", ConversationTurn::user("Q1")).await;
        store.append("s", ConversationTurn::assistant("A1")).await;
        store.append("s", ConversationTurn::user("Q2")).await;
        store.append("s", ConversationTurn::assistant("A2")).await;
        let history = store.history("s").await;
        assert_eq!(
            history,
            vec![
                ConversationTurn::assistant("A1"),
                ConversationTurn::user("Q2"),
                ConversationTurn::assistant("A2"),
            ]
        );
    }

    #[tokio::test]
    async fn test_reset_clears_history() {
        let store = InMemoryConversationStore::new();
        store.append("s1", ConversationTurn::user("hello")).await;
        store.reset("s1").await;
        assert!(store.history("s1").await.is_empty());

        // Unknown sessions reset to empty too.
        store.reset("never-seen").await;
        assert!(store.history("never-seen").await.is_empty());
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = InMemoryConversationStore::new();
        store.append("a", ConversationTurn::user("for a")).await;
        store.append("b", ConversationTurn::user("for b")).await;
        assert_eq!(store.history("a").await.len(), 1);
        assert_eq!(store.history("b").await[0].content, "for b");
        assert_eq!(store.session_count().await, 2);
    }

    #[tokio::test]
    async fn test_concurrent_appends_stay_bounded() {
        let store = Arc::new(InMemoryConversationStore::new());
        let mut handles = Vec::new();
        for i in 0..50 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let session = if i % 2 == 0 { "even" } else { "odd" };
                store
                    .append(session, ConversationTurn::user(i.to_string()))
                    .await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.history("even").await.len(), 10);
        assert_eq!(store.history("odd").await.len(), 10);
    }
}
