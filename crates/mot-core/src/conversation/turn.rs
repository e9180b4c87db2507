use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Capitalized label used in prompts and transcripts.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }

    /// Parse the leading `"<Role>: "` prefix of a transcript line.
    pub fn strip_label(line: &str) -> Option<(Role, &str)> {
        [Role::User, Role::Assistant].into_iter().find_map(|role| {
            line.strip_prefix(role.label())
                .and_then(|rest| rest.strip_prefix(": ").or_else(|| rest.strip_prefix(':')))
                .map(|content| (role, content))
        })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One message in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// `"<Role>: <content>"`, the form shared by prompts and transcripts.
    pub fn to_line(&self) -> String {
        format!("{}: {}", self.role, self.content)
    }
}

/// Ordered, append-only sequence of turns for the active session.
///
/// Turns only enter through [`Conversation::push_exchange`], so a non-empty
/// conversation always alternates user, assistant, user, assistant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn followed by the assistant's reply.
    pub fn push_exchange(&mut self, user_message: impl Into<String>, reply: impl Into<String>) {
        self.turns.push(Turn::user(user_message));
        self.turns.push(Turn::assistant(reply));
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Number of completed user/assistant exchanges.
    pub fn exchanges(&self) -> usize {
        self.turns.len() / 2
    }

    pub(crate) fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}
