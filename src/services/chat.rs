//! Chat store — durable chat/message document with CRUD operations.
//!
//! DESIGN
//! ======
//! All chats and messages live in one JSON document on disk. Every
//! operation runs a full read-modify-write cycle against that document,
//! serialized behind a single async mutex so concurrent requests cannot
//! lose updates (two creates computing the same id, a rename racing a
//! delete). Persisting writes a temp sibling file and renames it into
//! place, so a reader never observes a half-written document.
//!
//! ERROR HANDLING
//! ==============
//! Reads degrade: a missing or malformed document loads as an empty store
//! (logged, never propagated). Writes are strict: a mutation either
//! persists fully or surfaces `ChatError::Persistence` with nothing
//! committed. Multi-step mutations (chat + its message bucket) are applied
//! to the in-memory document first and hit disk in one write.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat not found: {0}")]
    NotFound(u64),
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("storage persistence failed: {0}")]
    Persistence(#[from] std::io::Error),
}

/// A named conversation thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// One turn in a chat. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// The persisted document root: every chat, and every chat's messages
/// keyed by chat id. Map keys serialize as strings in JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreData {
    pub chats: Vec<Chat>,
    pub messages: BTreeMap<u64, Vec<Message>>,
}

// =============================================================================
// STORE
// =============================================================================

/// Handle to the chat document. Cheap to clone; all clones share the
/// storage path and the mutation lock.
#[derive(Clone)]
pub struct ChatStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ChatStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { inner: Arc::new(StoreInner { path: path.into(), lock: Mutex::new(()) }) }
    }

    /// Write an empty document if none exists yet. Surfaces an unwritable
    /// storage location at startup instead of on the first mutation.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Persistence` if the existence check or the
    /// initial write fails.
    pub async fn ensure_initialized(&self) -> Result<(), ChatError> {
        let _guard = self.inner.lock.lock().await;
        match tokio::fs::metadata(&self.inner.path).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.persist(&StoreData::default()).await?;
                info!(path = %self.inner.path.display(), "initialized empty chat storage");
                Ok(())
            }
            Err(e) => Err(ChatError::Persistence(e)),
        }
    }

    /// Load the full store snapshot. A missing, unreadable, or malformed
    /// document loads as an empty store; reads never fail the caller.
    pub async fn load(&self) -> StoreData {
        let _guard = self.inner.lock.lock().await;
        self.read_snapshot().await
    }

    /// Create a chat with the next free id and an empty message bucket.
    /// Returns the new chat. A failed persist commits nothing and consumes
    /// no id: the next id is always recomputed from the chats on disk.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Persistence` if the write-back fails.
    pub async fn create_chat(&self) -> Result<Chat, ChatError> {
        let _guard = self.inner.lock.lock().await;
        let mut data = self.read_snapshot().await;

        let id = next_chat_id(&data.chats);
        let chat = Chat { id, name: format!("Chat {id}"), created_at: Utc::now() };
        data.chats.push(chat.clone());
        data.messages.entry(id).or_default();

        self.persist(&data).await?;
        info!(chat_id = id, "created chat");
        Ok(chat)
    }

    /// Rename a chat in place.
    ///
    /// # Errors
    ///
    /// `NotFound` if no chat has `id`, `InvalidArgument` if `new_name` is
    /// empty, `Persistence` if the write-back fails.
    pub async fn rename_chat(&self, id: u64, new_name: &str) -> Result<(), ChatError> {
        if new_name.is_empty() {
            return Err(ChatError::InvalidArgument("new name must not be empty"));
        }

        let _guard = self.inner.lock.lock().await;
        let mut data = self.read_snapshot().await;

        let chat = data
            .chats
            .iter_mut()
            .find(|chat| chat.id == id)
            .ok_or(ChatError::NotFound(id))?;
        chat.name = new_name.to_owned();

        self.persist(&data).await?;
        info!(chat_id = id, "renamed chat");
        Ok(())
    }

    /// Delete a chat and its entire message bucket. Irreversible.
    ///
    /// # Errors
    ///
    /// `NotFound` if no chat has `id`, `Persistence` if the write-back fails.
    pub async fn delete_chat(&self, id: u64) -> Result<(), ChatError> {
        let _guard = self.inner.lock.lock().await;
        let mut data = self.read_snapshot().await;

        let index = data
            .chats
            .iter()
            .position(|chat| chat.id == id)
            .ok_or(ChatError::NotFound(id))?;
        data.chats.remove(index);
        data.messages.remove(&id);

        self.persist(&data).await?;
        info!(chat_id = id, "deleted chat");
        Ok(())
    }

    /// List chats in storage (creation) order.
    pub async fn list_chats(&self) -> Vec<Chat> {
        self.load().await.chats
    }

    /// Messages for a chat, oldest first. An id with no bucket yields an
    /// empty sequence; absence of messages is a normal state, not an error.
    pub async fn get_messages(&self, id: u64) -> Vec<Message> {
        self.load()
            .await
            .messages
            .remove(&id)
            .unwrap_or_default()
    }

    /// Append a user message and its ai reply to a chat, both stamped at
    /// call time. Creates the message bucket if the chat exists without
    /// one.
    ///
    /// # Errors
    ///
    /// `NotFound` if no chat has `id`; `Persistence` if the write-back
    /// fails, in which case nothing was durably recorded (the store does
    /// not retry).
    pub async fn append_exchange(&self, id: u64, user_content: &str, ai_content: &str) -> Result<(), ChatError> {
        let _guard = self.inner.lock.lock().await;
        let mut data = self.read_snapshot().await;

        if !data.chats.iter().any(|chat| chat.id == id) {
            return Err(ChatError::NotFound(id));
        }

        let timestamp = Utc::now();
        let bucket = data.messages.entry(id).or_default();
        bucket.push(Message { sender: Sender::User, content: user_content.to_owned(), timestamp });
        bucket.push(Message { sender: Sender::Ai, content: ai_content.to_owned(), timestamp });

        self.persist(&data).await?;
        info!(chat_id = id, total = bucket_len(&data, id), "appended exchange");
        Ok(())
    }

    // =========================================================================
    // PERSISTENCE
    // =========================================================================

    /// Read the document without taking the lock; callers hold it.
    async fn read_snapshot(&self) -> StoreData {
        let bytes = match tokio::fs::read(&self.inner.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return StoreData::default(),
            Err(e) => {
                warn!(error = %e, path = %self.inner.path.display(), "storage unreadable; loading empty store");
                return StoreData::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, path = %self.inner.path.display(), "storage malformed; loading empty store");
                StoreData::default()
            }
        }
    }

    /// Write the whole document: temp sibling first, then rename over the
    /// real path so concurrent readers see the old or the new document,
    /// never a partial one.
    async fn persist(&self, data: &StoreData) -> Result<(), ChatError> {
        let json = serde_json::to_vec_pretty(data).map_err(|e| ChatError::Persistence(e.into()))?;

        let tmp = tmp_path(&self.inner.path);
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.inner.path).await?;
        Ok(())
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Next id = max(existing) + 1, or 1 for an empty store. Recomputed from
/// current state on every create.
fn next_chat_id(chats: &[Chat]) -> u64 {
    chats.iter().map(|chat| chat.id).max().map_or(1, |max| max + 1)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

fn bucket_len(data: &StoreData, id: u64) -> usize {
    data.messages.get(&id).map_or(0, Vec::len)
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
