//! In-memory conversation sessions, keyed by id. History lives for the
//! process lifetime only; restarting the server forgets everything.

use std::collections::HashMap;
use std::sync::Arc;

use shopscout_agent::ConversationTurn;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Vec<ConversationTurn>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a session's transcript. Unknown ids yield an empty
    /// transcript; a session only materializes on its first exchange.
    pub async fn history(&self, session_id: &str) -> Vec<ConversationTurn> {
        self.inner.read().await.get(session_id).cloned().unwrap_or_default()
    }

    /// Record one completed turn. Called only after the agent produced a
    /// reply, so a failed turn never pollutes the transcript.
    pub async fn append_exchange(&self, session_id: &str, user: &str, assistant: &str) {
        let mut sessions = self.inner.write().await;
        let transcript = sessions.entry(session_id.to_string()).or_default();
        transcript.push(ConversationTurn::user(user));
        transcript.push(ConversationTurn::assistant(assistant));
    }

    /// Clear one session, or every session when no id is given. Returns the
    /// number of sessions removed.
    pub async fn clear(&self, session_id: Option<&str>) -> usize {
        let mut sessions = self.inner.write().await;
        match session_id {
            Some(id) => usize::from(sessions.remove(id).is_some()),
            None => {
                let removed = sessions.len();
                sessions.clear();
                removed
            }
        }
    }

    pub async fn session_count(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::SessionStore;

    #[tokio::test]
    async fn unknown_session_has_empty_history() {
        let store = SessionStore::new();
        assert!(store.history("nope").await.is_empty());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn exchanges_accumulate_per_session() {
        let store = SessionStore::new();

        store.append_exchange("s1", "I want a cake", "Try Value Mart.").await;
        store.append_exchange("s1", "anything fancier?", "Organic Emporium.").await;
        store.append_exchange("s2", "I need a hammer", "Corner Hardware.").await;

        assert_eq!(store.history("s1").await.len(), 4);
        assert_eq!(store.history("s2").await.len(), 2);
    }

    #[tokio::test]
    async fn clearing_one_session_leaves_the_others() {
        let store = SessionStore::new();
        store.append_exchange("s1", "a", "b").await;
        store.append_exchange("s2", "c", "d").await;

        assert_eq!(store.clear(Some("s1")).await, 1);
        assert!(store.history("s1").await.is_empty());
        assert_eq!(store.history("s2").await.len(), 2);
    }

    #[tokio::test]
    async fn clearing_without_an_id_wipes_everything() {
        let store = SessionStore::new();
        store.append_exchange("s1", "a", "b").await;
        store.append_exchange("s2", "c", "d").await;

        assert_eq!(store.clear(None).await, 2);
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn clearing_an_unknown_session_removes_nothing() {
        let store = SessionStore::new();
        store.append_exchange("s1", "a", "b").await;

        assert_eq!(store.clear(Some("ghost")).await, 0);
        assert_eq!(store.session_count().await, 1);
    }
}
