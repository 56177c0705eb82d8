//! Playback metadata.
//!
//! Playback re-displays an existing conversation step by step without
//! regenerating responses. The whole original message list (both roles) is
//! staged in `messages_stack`; only the first `active_playback_index` entries
//! are visible.

use super::message::Message;
use crate::error::{ChatseedError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playback {
    pub is_playback: bool,
    pub active_playback_index: usize,
    #[serde(default)]
    pub messages_stack: Vec<Message>,
}

impl Playback {
    /// Stages `stack` with the first `index` messages visible.
    pub fn start_at(stack: Vec<Message>, index: usize) -> Result<Self> {
        if index > stack.len() {
            return Err(ChatseedError::invalid_input(format!(
                "playback index {} exceeds {} staged messages",
                index,
                stack.len()
            )));
        }
        Ok(Self {
            is_playback: true,
            active_playback_index: index,
            messages_stack: stack,
        })
    }

    pub fn visible_messages(&self) -> &[Message] {
        let end = self.active_playback_index.min(self.messages_stack.len());
        &self.messages_stack[..end]
    }

    pub fn is_at_end(&self) -> bool {
        self.active_playback_index >= self.messages_stack.len()
    }

    /// Reveals the next staged message. Returns `false` at the end.
    pub fn step_forward(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.active_playback_index += 1;
        true
    }

    /// Hides the last revealed message. Returns `false` at the start.
    pub fn step_back(&mut self) -> bool {
        if self.active_playback_index == 0 {
            return false;
        }
        self.active_playback_index -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack() -> Vec<Message> {
        vec![
            Message::user("u1"),
            Message::assistant("a1"),
            Message::user("u2"),
            Message::assistant("a2"),
        ]
    }

    #[test]
    fn test_start_at_zero_shows_nothing() {
        let playback = Playback::start_at(stack(), 0).unwrap();
        assert!(playback.visible_messages().is_empty());
        assert_eq!(playback.messages_stack.len(), 4);
    }

    #[test]
    fn test_stepping_is_bounded() {
        let mut playback = Playback::start_at(stack(), 3).unwrap();
        assert_eq!(playback.visible_messages().len(), 3);

        assert!(playback.step_forward());
        assert!(playback.is_at_end());
        assert!(!playback.step_forward());
        assert_eq!(playback.active_playback_index, 4);

        for _ in 0..4 {
            assert!(playback.step_back());
        }
        assert!(!playback.step_back());
        assert_eq!(playback.active_playback_index, 0);
    }

    #[test]
    fn test_start_beyond_stack_fails() {
        assert!(Playback::start_at(stack(), 5).unwrap_err().is_invalid_input());
    }
}
