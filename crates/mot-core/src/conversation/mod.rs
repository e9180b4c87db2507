mod turn;
mod prompt;
mod session;
pub mod transcript;

pub use turn::{Conversation, Role, Turn};
pub use prompt::{PromptBuilder, ASSISTANT_CUE};
pub use session::{SessionHandle, SessionState, DEFAULT_SESSION_FILE};
pub use transcript::{TranscriptInfo, TranscriptStore};
