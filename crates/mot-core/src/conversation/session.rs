use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use std::fmt;
use std::path::PathBuf;

use super::transcript::TranscriptStore;
use super::turn::Conversation;
use crate::error::Result;

/// File name used until the first "new chat".
pub const DEFAULT_SESSION_FILE: &str = "chat_temp.txt";

const HANDLE_PREFIX: &str = "chat_";
const HANDLE_SUFFIX: &str = ".txt";
const HANDLE_TIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Name of the file the current conversation is written to on save.
///
/// A handle is only a name; nothing exists on disk until a save happens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionHandle(String);

impl SessionHandle {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self(file_name.into())
    }

    /// `chat_YYYY-MM-DD_HH-MM-SS.txt` for the given instant.
    pub fn timestamped<Tz: TimeZone>(at: &DateTime<Tz>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        Self(format!(
            "{HANDLE_PREFIX}{}{HANDLE_SUFFIX}",
            at.format(HANDLE_TIME_FORMAT)
        ))
    }

    pub fn now() -> Self {
        Self::timestamped(&Local::now())
    }

    pub fn file_name(&self) -> &str {
        &self.0
    }

    /// Whether the name follows the timestamp pattern produced by [`SessionHandle::now`].
    pub fn is_timestamped(&self) -> bool {
        self.0
            .strip_prefix(HANDLE_PREFIX)
            .and_then(|rest| rest.strip_suffix(HANDLE_SUFFIX))
            .is_some_and(|stamp| {
                stamp.len() == 19 && NaiveDateTime::parse_from_str(stamp, HANDLE_TIME_FORMAT).is_ok()
            })
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_FILE)
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The active conversation and where it will be saved.
///
/// Two states only: empty (after construction or [`reset`](Self::reset))
/// and non-empty (after the first [`append`](Self::append)).
pub struct SessionState {
    conversation: Conversation,
    handle: SessionHandle,
    store: TranscriptStore,
}

impl SessionState {
    pub fn new(store: TranscriptStore, handle: SessionHandle) -> Self {
        Self {
            conversation: Conversation::new(),
            handle,
            store,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    pub fn store(&self) -> &TranscriptStore {
        &self.store
    }

    /// Record one exchange: the user's message, then the assistant's reply.
    pub fn append(
        &mut self,
        user_message: impl Into<String>,
        assistant_reply: impl Into<String>,
    ) -> &Conversation {
        self.conversation.push_exchange(user_message, assistant_reply);
        &self.conversation
    }

    /// Start a new chat. Previously saved files are left untouched.
    pub fn reset(&mut self) -> &SessionHandle {
        self.conversation = Conversation::new();
        self.handle = SessionHandle::now();
        tracing::info!(handle = %self.handle, "started new chat");
        &self.handle
    }

    /// Write the conversation to the file named by the current handle.
    pub fn save(&self) -> Result<PathBuf> {
        self.store.save(&self.conversation, &self.handle)
    }

    /// Replace the conversation with a saved transcript and adopt its name,
    /// so a later save overwrites the same file.
    pub fn load(&mut self, handle: SessionHandle) -> Result<&Conversation> {
        self.conversation = self.store.load(&handle)?;
        self.handle = handle;
        Ok(&self.conversation)
    }
}
