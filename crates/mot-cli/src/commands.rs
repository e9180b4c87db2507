/// Result of processing a slash command.
#[derive(Debug, Clone)]
pub enum CommandResult {
    /// Display a message to the user.
    Message(String),
    /// Quit the application.
    Quit,
    /// Start a fresh conversation with a timestamped file name.
    NewChat,
    /// Write the conversation to its current file.
    SaveChat,
    /// List saved transcripts.
    ListChats,
    /// Load a saved transcript by file name.
    LoadChat(String),
    /// Change the theme.
    ThemeChanged(String),
    /// Show status (endpoint, file, turn count).
    ShowStatus,
    /// Not a command - treat as regular input.
    NotACommand,
}

pub fn handle_command(input: &str) -> CommandResult {
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/help" | "/h" => show_help(),
        "/exit" | "/quit" | "/q" => CommandResult::Quit,
        "/new" => CommandResult::NewChat,
        "/save" => CommandResult::SaveChat,
        "/chats" | "/history" => CommandResult::ListChats,
        "/load" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /load <file-name>  (see /chats)".into())
            } else {
                CommandResult::LoadChat(arg.to_string())
            }
        }
        "/theme" => {
            if arg.is_empty() {
                let themes = crate::theme::Theme::all_names().join(", ");
                CommandResult::Message(format!("Available themes: {themes}\nUsage: /theme <theme-name>"))
            } else {
                CommandResult::ThemeChanged(arg.to_string())
            }
        }
        "/status" => CommandResult::ShowStatus,
        "/version" => CommandResult::Message(format!("M.O.T v{}", env!("CARGO_PKG_VERSION"))),

        _ => {
            if input.starts_with('/') {
                CommandResult::Message(format!("Unknown command: {cmd}. Type /help for commands."))
            } else {
                CommandResult::NotACommand
            }
        }
    }
}

/// Commands offered by Tab completion.
pub const COMMANDS: &[&str] = &[
    "/help", "/new", "/save", "/chats", "/history", "/load", "/theme", "/status", "/version",
    "/quit", "/exit",
];

/// Complete a partially typed command when exactly one command matches.
pub fn complete_command(input: &str) -> Option<String> {
    let matches: Vec<&&str> = COMMANDS.iter().filter(|c| c.starts_with(input)).collect();

    if matches.len() == 1 {
        Some(format!("{} ", matches[0]))
    } else {
        None
    }
}

fn show_help() -> CommandResult {
    let help_text = "\
╭─ M.O.T Commands ──────────────────────────────────────────╮

  CHAT
    /new                      New chat (Ctrl+N)
    /save                     Save chat to its file (Ctrl+S)
    /chats, /history          List saved chats
    /load <file>              Load a saved chat

  DISPLAY
    /theme <name>             Change color theme
    /status                   Show endpoint, file and turn count

  OTHER
    /help, /h                 Show this help message
    /version                  Show version information
    /exit, /quit, /q          Quit (Ctrl+C)

╰───────────────────────────────────────────────────────────╯";

    CommandResult::Message(help_text.into())
}
