//! Domain logic for client-side operations.
//!
//! Pure functions without side effects, so they are easy to test.

/// What a line typed at the prompt means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Send the text as a chat message
    Chat(String),
    /// `/users`: ask the server to broadcast the roster
    RequestUsers,
    /// `/quit`: leave the chat
    Quit,
    /// Blank line, nothing to send
    Empty,
}

/// Interpret one line of user input.
///
/// Surrounding whitespace is trimmed before matching, so `"  /quit "` quits
/// and a whitespace-only line is never sent.
pub fn parse_input(line: &str) -> InputCommand {
    match line.trim() {
        "" => InputCommand::Empty,
        "/users" => InputCommand::RequestUsers,
        "/quit" => InputCommand::Quit,
        text => InputCommand::Chat(text.to_string()),
    }
}
