use mot_cli::commands::{complete_command, handle_command, CommandResult};
use mot_cli::Theme;

// ========================================================================
// Command Parsing Tests (commands.rs)
// ========================================================================

// --- BASIC SLASH COMMANDS ---

#[test]
fn test_help_command() {
    match handle_command("/help") {
        CommandResult::Message(msg) => {
            assert!(msg.contains("M.O.T Commands"));
            assert!(msg.contains("/new"));
            assert!(msg.contains("/save"));
        }
        other => panic!("Expected Message, got {:?}", other),
    }
}

#[test]
fn test_help_command_short_alias() {
    assert!(matches!(handle_command("/h"), CommandResult::Message(_)));
}

#[test]
fn test_quit_aliases() {
    for cmd in ["/exit", "/quit", "/q"] {
        assert!(matches!(handle_command(cmd), CommandResult::Quit), "{cmd}");
    }
}

#[test]
fn test_new_chat_command() {
    assert!(matches!(handle_command("/new"), CommandResult::NewChat));
}

#[test]
fn test_save_chat_command() {
    assert!(matches!(handle_command("/save"), CommandResult::SaveChat));
}

#[test]
fn test_chats_command_and_alias() {
    assert!(matches!(handle_command("/chats"), CommandResult::ListChats));
    assert!(matches!(handle_command("/history"), CommandResult::ListChats));
}

#[test]
fn test_status_command() {
    assert!(matches!(handle_command("/status"), CommandResult::ShowStatus));
}

#[test]
fn test_version_command() {
    match handle_command("/version") {
        CommandResult::Message(msg) => {
            assert!(msg.starts_with("M.O.T v"));
            assert!(msg.contains(env!("CARGO_PKG_VERSION")));
        }
        other => panic!("Expected Message, got {:?}", other),
    }
}

// --- COMMANDS WITH ARGUMENTS ---

#[test]
fn test_load_command_with_name() {
    match handle_command("/load chat_2024-05-01_10-00-00.txt") {
        CommandResult::LoadChat(name) => assert_eq!(name, "chat_2024-05-01_10-00-00.txt"),
        other => panic!("Expected LoadChat, got {:?}", other),
    }
}

#[test]
fn test_load_command_trims_whitespace() {
    match handle_command("/load   chat_temp.txt  ") {
        CommandResult::LoadChat(name) => assert_eq!(name, "chat_temp.txt"),
        other => panic!("Expected LoadChat, got {:?}", other),
    }
}

#[test]
fn test_load_command_without_name() {
    match handle_command("/load") {
        CommandResult::Message(msg) => assert!(msg.contains("Usage: /load")),
        other => panic!("Expected usage Message, got {:?}", other),
    }
}

#[test]
fn test_theme_command() {
    match handle_command("/theme dark") {
        CommandResult::ThemeChanged(name) => assert_eq!(name, "dark"),
        other => panic!("Expected ThemeChanged, got {:?}", other),
    }

    match handle_command("/theme") {
        CommandResult::Message(msg) => {
            for name in Theme::all_names() {
                assert!(msg.contains(name));
            }
        }
        other => panic!("Expected Message, got {:?}", other),
    }
}

// --- NON-COMMANDS ---

#[test]
fn test_unknown_command() {
    match handle_command("/frobnicate") {
        CommandResult::Message(msg) => assert!(msg.contains("Unknown command: /frobnicate")),
        other => panic!("Expected Message, got {:?}", other),
    }
}

#[test]
fn test_plain_text_is_not_a_command() {
    assert!(matches!(
        handle_command("Hello there"),
        CommandResult::NotACommand
    ));
}

// ========================================================================
// Completion and Theme Tests
// ========================================================================

#[test]
fn test_complete_unique_prefix() {
    assert_eq!(complete_command("/ch"), Some("/chats ".to_string()));
    assert_eq!(complete_command("/ne"), Some("/new ".to_string()));
    assert_eq!(complete_command("/q"), Some("/quit ".to_string()));
}

#[test]
fn test_complete_ambiguous_or_unknown_prefix() {
    assert_eq!(complete_command("/s"), None);
    assert_eq!(complete_command("/h"), None);
    assert_eq!(complete_command("/zzz"), None);
}

#[test]
fn test_theme_by_name_falls_back_to_soft() {
    assert_eq!(Theme::by_name("dark").name, "dark");
    assert_eq!(Theme::by_name("mixtral").name, "mixtral");
    assert_eq!(Theme::by_name("nope").name, "soft");
}
