// Library interface for mot-cli so integration tests can reach the
// command parser and themes. main.rs declares the same files as modules.

#[path = "commands.rs"]
pub mod commands;

#[path = "theme.rs"]
pub mod theme;

pub use commands::{complete_command, handle_command, CommandResult};
pub use theme::Theme;
