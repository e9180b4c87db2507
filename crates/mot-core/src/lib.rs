pub mod error;
pub mod llm;
pub mod conversation;
pub mod chat;
pub mod config;

// Re-export key types
pub use error::MotError;
pub use llm::{GenerationParams, HuggingFaceClient, InferenceClient, InferenceFailure, Reply};
pub use conversation::{
    Conversation, PromptBuilder, Role, SessionHandle, SessionState, TranscriptStore, Turn,
};
pub use chat::ChatService;
pub use config::{Config, Settings};
