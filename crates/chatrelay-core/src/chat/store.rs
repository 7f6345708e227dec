//! In-memory conversation store.
//!
//! `ConversationStore` maps session ids to transcripts. Entries are created
//! lazily on first access and live for the lifetime of the process.
//!
//! Transcripts are cloned on read so no `DashMap` guard is ever held across
//! an `.await`. Turn serialization uses a separate per-session async mutex:
//! a caller holding a [`SessionGuard`] is the only one running a
//! read -> respond -> write cycle for that session, while other sessions
//! proceed in parallel.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use chatrelay_types::chat::Transcript;

/// Process-wide session id -> transcript map.
///
/// Construct once at startup and hand clones to whoever needs it; clones
/// share the same underlying data (backed by `Arc`).
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    inner: Arc<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    transcripts: DashMap<String, Transcript>,
    turn_locks: DashMap<String, Arc<Mutex<()>>>,
}

/// Exclusive right to run a turn for one session. Released on drop.
#[derive(Debug)]
pub struct SessionGuard {
    _turn: OwnedMutexGuard<()>,
}

impl ConversationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the transcript for `session_id`, creating an empty one if absent.
    ///
    /// Never fails. The returned value is a snapshot; changes to it are only
    /// visible to other readers after [`update`](Self::update).
    pub fn get(&self, session_id: &str) -> Transcript {
        if let Some(existing) = self.inner.transcripts.get(session_id) {
            return existing.value().clone();
        }
        self.inner
            .transcripts
            .entry(session_id.to_string())
            .or_default()
            .value()
            .clone()
    }

    /// Replace the stored transcript for `session_id` unconditionally.
    pub fn update(&self, session_id: &str, transcript: Transcript) {
        self.inner
            .transcripts
            .insert(session_id.to_string(), transcript);
    }

    /// Acquire the turn lock for `session_id`.
    ///
    /// Waits while another turn for the same session is in progress. Guards
    /// for different sessions never contend with each other.
    pub async fn lock_session(&self, session_id: &str) -> SessionGuard {
        let lock = self
            .inner
            .turn_locks
            .entry(session_id.to_string())
            .or_default()
            .value()
            .clone();

        SessionGuard {
            _turn: lock.lock_owned().await,
        }
    }

    /// Number of sessions with a transcript.
    pub fn len(&self) -> usize {
        self.inner.transcripts.len()
    }

    /// Whether no session has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.inner.transcripts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chatrelay_types::chat::Message;

    use super::*;

    #[test]
    fn get_unknown_session_returns_empty() {
        let store = ConversationStore::new();
        assert!(store.get("never-seen").is_empty());
        assert!(store.get("another").is_empty());
    }

    #[test]
    fn get_creates_entry_lazily() {
        let store = ConversationStore::new();
        assert!(store.is_empty());
        let _ = store.get("s1");
        assert_eq!(store.len(), 1);
        let _ = store.get("s1");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn repeated_reads_are_equal_until_update() {
        let store = ConversationStore::new();
        store.update("s1", Transcript::from(vec![Message::user("hi")]));

        let first = store.get("s1");
        let second = store.get("s1");
        assert_eq!(first, second);

        store.update("s1", Transcript::new());
        assert!(store.get("s1").is_empty());
    }

    #[test]
    fn mutating_a_snapshot_does_not_leak_without_update() {
        let store = ConversationStore::new();
        let mut snapshot = store.get("s1");
        snapshot.push(Message::user("draft"));
        assert!(store.get("s1").is_empty());
    }

    #[test]
    fn update_overwrites_unconditionally() {
        let store = ConversationStore::new();
        store.update("s1", Transcript::from(vec![Message::user("a")]));
        store.update("s1", Transcript::from(vec![Message::user("b"), Message::assistant("c")]));

        let transcript = store.get("s1");
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[0].content, "b");
    }

    #[test]
    fn clone_shares_data() {
        let store = ConversationStore::new();
        let other = store.clone();
        store.update("shared", Transcript::from(vec![Message::user("x")]));
        assert_eq!(other.get("shared").len(), 1);
    }

    #[tokio::test]
    async fn lock_session_serializes_same_session() {
        let store = ConversationStore::new();
        let guard = store.lock_session("s1").await;

        let contender = store.clone();
        let waiter = tokio::spawn(async move {
            let _guard = contender.lock_session("s1").await;
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should acquire after release")
            .unwrap();
    }

    #[tokio::test]
    async fn lock_session_does_not_block_other_sessions() {
        let store = ConversationStore::new();
        let _held = store.lock_session("s1").await;

        let other = tokio::time::timeout(Duration::from_secs(1), store.lock_session("s2")).await;
        assert!(other.is_ok());
    }

    #[tokio::test]
    async fn concurrent_updates_no_panic() {
        let store = ConversationStore::new();
        let mut handles = Vec::new();

        for i in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let sid = format!("session-{i}");
                let mut transcript = store.get(&sid);
                transcript.push(Message::user(format!("m{i}")));
                store.update(&sid, transcript);
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len(), 50);
    }
}
