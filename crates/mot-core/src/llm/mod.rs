mod traits;
mod huggingface;

pub use traits::*;
pub use huggingface::{extract_reply, parse_generation, HuggingFaceClient, DEFAULT_ENDPOINT};
