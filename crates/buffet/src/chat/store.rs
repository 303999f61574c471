//! In-memory chat thread store with write-through persistence.
//!
//! The store owns every thread and the active thread id. Each mutation is
//! applied in memory first and then the whole collection is written to the
//! backing [`ThreadStorage`]. Write failures are logged and swallowed.

use tracing::{debug, warn};

use buffet_types::ModelResult;

use super::storage::ThreadStorage;
use super::thread::{ChatThread, ModelResponse, Turn};

/// Key holding the serialized thread collection.
pub const THREADS_KEY: &str = "llm-buffet-chats";

/// Key holding the id of the active thread.
pub const ACTIVE_KEY: &str = "llm-buffet-active-chat";

pub struct ChatStore {
    /// Newest first.
    threads: Vec<ChatThread>,
    active: Option<String>,
    storage: Box<dyn ThreadStorage>,
}

impl ChatStore {
    /// Build a store from whatever `storage` currently holds.
    ///
    /// Missing or unreadable data yields an empty store.
    pub async fn load(storage: Box<dyn ThreadStorage>) -> Self {
        let threads = match storage.get(THREADS_KEY).await {
            Ok(Some(raw)) => serde_json::from_str::<Vec<ChatThread>>(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Discarding unreadable chat history");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read chat history");
                Vec::new()
            }
        };

        let active = match storage.get(ACTIVE_KEY).await {
            Ok(id) => id.filter(|id| threads.iter().any(|t| &t.id == id)),
            Err(e) => {
                warn!(error = %e, "Failed to read active chat");
                None
            }
        };

        debug!(threads = threads.len(), active = ?active, "Loaded chat store");
        Self {
            threads,
            active,
            storage,
        }
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Return the active thread id, creating and activating an empty thread
    /// when there is none.
    pub async fn ensure_active_thread(&mut self) -> String {
        if let Some(id) = &self.active
            && self.threads.iter().any(|t| &t.id == id)
        {
            return id.clone();
        }
        self.start_new_thread().await
    }

    /// Create and activate an empty thread. Existing threads are untouched.
    pub async fn start_new_thread(&mut self) -> String {
        let thread = ChatThread::new();
        let id = thread.id.clone();
        self.threads.insert(0, thread);
        self.active = Some(id.clone());
        self.persist().await;
        id
    }

    /// Make an existing thread active. Returns false if it does not exist.
    pub async fn open_thread(&mut self, thread_id: &str) -> bool {
        if self.thread(thread_id).is_none() {
            return false;
        }
        self.active = Some(thread_id.to_string());
        self.persist().await;
        true
    }

    /// Append a turn with no responses and return its index.
    pub async fn append_turn(&mut self, thread_id: &str, prompt: &str) -> Option<usize> {
        let thread = self.thread_mut(thread_id)?;
        thread.turns.push(Turn::new(prompt));
        let index = thread.turns.len() - 1;
        self.persist().await;
        Some(index)
    }

    /// Record each result under its model at the given turn, replacing any
    /// earlier response from that model.
    ///
    /// Does nothing if the thread or turn no longer exists.
    pub async fn merge_responses(
        &mut self,
        thread_id: &str,
        turn_index: usize,
        results: &[ModelResult],
    ) {
        let Some(turn) = self
            .thread_mut(thread_id)
            .and_then(|t| t.turns.get_mut(turn_index))
        else {
            debug!(thread_id, turn_index, "Dropping responses for missing turn");
            return;
        };

        for result in results {
            turn.responses
                .insert(result.model.clone(), ModelResponse::from(result));
        }
        self.persist().await;
    }

    /// Rename a thread while it still has the placeholder title or at most
    /// one turn. Returns true if the title was replaced.
    pub async fn rename_if_default(&mut self, thread_id: &str, candidate: &str) -> bool {
        let Some(thread) = self.thread_mut(thread_id) else {
            return false;
        };
        if !(thread.has_default_title() || thread.turns.len() <= 1) {
            return false;
        }
        thread.title = candidate.to_string();
        self.persist().await;
        true
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn thread(&self, thread_id: &str) -> Option<&ChatThread> {
        self.threads.iter().find(|t| t.id == thread_id)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_thread(&self) -> Option<&ChatThread> {
        self.active.as_deref().and_then(|id| self.thread(id))
    }

    /// All threads, newest first.
    pub fn threads(&self) -> &[ChatThread] {
        &self.threads
    }

    /// Threads that have at least one turn, newest first.
    pub fn history(&self) -> impl Iterator<Item = &ChatThread> {
        self.threads.iter().filter(|t| !t.turns.is_empty())
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    fn thread_mut(&mut self, thread_id: &str) -> Option<&mut ChatThread> {
        self.threads.iter_mut().find(|t| t.id == thread_id)
    }

    async fn persist(&self) {
        match serde_json::to_string(&self.threads) {
            Ok(json) => {
                if let Err(e) = self.storage.set(THREADS_KEY, &json).await {
                    warn!(error = %e, "Failed to persist chat threads");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize chat threads"),
        }

        let active = self.active.as_deref().unwrap_or_default();
        if let Err(e) = self.storage.set(ACTIVE_KEY, active).await {
            warn!(error = %e, "Failed to persist active chat");
        }
    }
}
