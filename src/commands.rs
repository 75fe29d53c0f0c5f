//! Chat command recognition
//!
//! A command is recognised when it is the last non-whitespace token of a chat
//! line. Chat lines usually carry a sender prefix (`alice: /start`) and may wrap
//! the command in quotes, so the token may be preceded by whitespace or a
//! quoting marker and followed by a closing quote.

use crate::feed::ChatMessage;
use std::collections::HashSet;

pub const START: &str = "/start";
pub const STOP: &str = "/stop";

const QUOTES: &[char] = &['"', '\'', '`', '>', '\u{201c}', '\u{201d}'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
}

impl Command {
    pub fn token(self) -> &'static str {
        match self {
            Command::Start => START,
            Command::Stop => STOP,
        }
    }

    pub fn matches(self, text: &str) -> bool {
        ends_with_command(text, self.token())
    }
}

/// Case-sensitive, anchored at end of string
pub fn ends_with_command(text: &str, command: &str) -> bool {
    let text = text.trim_end();
    let text = text.strip_suffix(|c: char| QUOTES.contains(&c)).unwrap_or(text);

    let Some(before) = text.strip_suffix(command) else {
        return false;
    };

    match before.chars().next_back() {
        None => true,
        Some(c) => c.is_whitespace() || QUOTES.contains(&c) || c == ':',
    }
}

/// Message ids that have already triggered a session
///
/// Grows for the lifetime of the process and is never pruned.
#[derive(Debug, Default)]
pub struct SeenIds {
    ids: HashSet<String>,
}

impl SeenIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id`; returns `false` if it was already seen
    pub fn accept(&mut self, id: &str) -> bool {
        if self.ids.contains(id) {
            return false;
        }
        self.ids.insert(id.to_string());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Accept `msg` as a session trigger if it is an unseen `/start`
    pub fn accept_start(&mut self, msg: &ChatMessage) -> bool {
        Command::Start.matches(&msg.message) && self.accept(&msg.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat(id: &str, text: &str) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            message: text.to_string(),
            timestamp: String::new(),
        }
    }

    #[test]
    fn test_matches_trailing_command() {
        assert!(Command::Start.matches("/start"));
        assert!(Command::Start.matches("alice /start"));
        assert!(Command::Start.matches("alice: /start  "));
        assert!(Command::Start.matches("<b>alice</b> /start"));
        assert!(Command::Start.matches("> /start"));
        assert!(Command::Start.matches("alice: \"/start\""));
        assert!(Command::Stop.matches("(12:00:01) bob: /stop"));
    }

    #[test]
    fn test_rejects_non_trailing_or_glued_command() {
        assert!(!Command::Start.matches("/start now"));
        assert!(!Command::Start.matches("restart/start"));
        assert!(!Command::Start.matches("/START"));
        assert!(!Command::Start.matches("/stop"));
        assert!(!Command::Stop.matches("/start"));
        assert!(!Command::Stop.matches(""));
    }

    #[test]
    fn test_same_id_triggers_once() {
        let mut seen = SeenIds::new();
        let msg = chat("m-1", "alice: /start");

        assert!(seen.accept_start(&msg));
        assert!(!seen.accept_start(&msg));
        assert!(!seen.accept_start(&chat("m-1", "bob: /start")));
        assert!(seen.accept_start(&chat("m-2", "bob: /start")));
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_non_start_is_not_recorded() {
        let mut seen = SeenIds::new();
        assert!(!seen.accept_start(&chat("m-1", "hello")));
        assert!(!seen.contains("m-1"));
        assert!(seen.is_empty());
    }
}
