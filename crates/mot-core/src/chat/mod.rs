use crate::conversation::{Conversation, PromptBuilder};
use crate::llm::{InferenceClient, Reply};

/// Turns a user message into an assistant reply against a given history.
///
/// Holds no conversation of its own: callers pass the history in and get
/// the result back, so the same service can serve any session.
pub struct ChatService {
    client: Box<dyn InferenceClient>,
}

impl ChatService {
    pub fn new(client: Box<dyn InferenceClient>) -> Self {
        Self { client }
    }

    /// Compose the prompt and call the model. Never fails: transport and
    /// format problems come back as [`Reply::Failed`].
    pub async fn reply(&self, history: &Conversation, message: &str) -> Reply {
        let prompt = PromptBuilder::build(history, message);
        let reply = Reply::from(self.client.generate(&prompt).await);
        if let Some(failure) = reply.failure() {
            tracing::warn!(turns = history.len(), "model call failed: {failure}");
        }
        reply
    }

    /// `(history, message) -> (history + exchange, reply)`. The exchange is
    /// appended even on failure, with the sentinel as the assistant turn.
    pub async fn exchange(
        &self,
        mut conversation: Conversation,
        message: &str,
    ) -> (Conversation, Reply) {
        let reply = self.reply(&conversation, message).await;
        conversation.push_exchange(message, reply.text());
        (conversation, reply)
    }
}
