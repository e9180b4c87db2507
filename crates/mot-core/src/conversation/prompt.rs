use super::turn::{Conversation, Role};

/// Cue that ends every prompt and marks where the model's reply begins.
pub const ASSISTANT_CUE: &str = "Assistant:";

/// Flattens a conversation plus a pending user message into a single
/// text-completion prompt:
///
/// ```text
/// User: <first message>
/// Assistant: <first reply>
/// User: <pending message>
/// Assistant:
/// ```
///
/// The full history is always included; there is no windowing.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(history: &Conversation, message: &str) -> String {
        let mut prompt = String::new();
        for turn in history {
            prompt.push_str(&turn.to_line());
            prompt.push('\n');
        }
        prompt.push_str(&format!("{}: {}\n{}", Role::User, message, ASSISTANT_CUE));
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        let prompt = PromptBuilder::build(&Conversation::new(), "Hello");
        assert_eq!(prompt, "User: Hello\nAssistant:");
    }

    #[test]
    fn test_history_in_order() {
        let mut history = Conversation::new();
        history.push_exchange("Hello", "Hi there!");
        history.push_exchange("Name?", "M.O.T");

        let prompt = PromptBuilder::build(&history, "Thanks");
        assert_eq!(
            prompt,
            "User: Hello\nAssistant: Hi there!\nUser: Name?\nAssistant: M.O.T\nUser: Thanks\nAssistant:"
        );
        assert_eq!(prompt.lines().count(), history.len() + 2);
    }

    #[test]
    fn test_deterministic() {
        let mut history = Conversation::new();
        history.push_exchange("a", "b");
        assert_eq!(
            PromptBuilder::build(&history, "c"),
            PromptBuilder::build(&history, "c")
        );
    }
}
