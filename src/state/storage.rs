//! In-memory session store
//!
//! Maps user ids to their conversation contexts. Each entry sits behind its
//! own async mutex: the driver holds that lock for the whole
//! read-transition-send-store cycle, which serializes events per user while
//! leaving distinct users free to proceed in parallel. The outer map lock is
//! held only for lookup and insert.
//!
//! Nothing is persisted; a restart forgets everyone. Idle entries can be
//! evicted by the optional TTL sweep configured in `[session]`.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use super::context::ConversationContext;

/// In-memory store of per-user conversation contexts
#[derive(Debug, Default)]
pub struct SessionStore {
    entries: RwLock<HashMap<i64, Arc<Mutex<ConversationContext>>>>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Get the entry for a user, creating it on first interaction.
    /// The returned lock is the per-user serialization point.
    pub async fn entry(&self, user_id: i64) -> Arc<Mutex<ConversationContext>> {
        if let Some(entry) = self.entries.read().await.get(&user_id) {
            return entry.clone();
        }

        let mut entries = self.entries.write().await;
        entries
            .entry(user_id)
            .or_insert_with(|| {
                debug!(user_id = user_id, "Creating conversation context");
                Arc::new(Mutex::new(ConversationContext::new(user_id)))
            })
            .clone()
    }

    /// Number of tracked users
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop entries that have been idle longer than `max_idle`.
    ///
    /// Entries whose lock is currently held (a transition in flight) are
    /// never evicted. Returns the number of evicted entries.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let mut entries = self.entries.write().await;
        let before = entries.len();

        entries.retain(|_, entry| match entry.try_lock() {
            Ok(context) => context.updated_at >= cutoff,
            Err(_) => true,
        });

        before - entries.len()
    }
}
