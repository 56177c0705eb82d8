//! Replay metadata.
//!
//! A replay conversation re-sends the user messages of a source conversation
//! one by one. The messages to send are staged in `replay_user_messages_stack`
//! and `active_replay_index` points at the next one.

use super::message::Message;
use crate::error::{ChatseedError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Replay {
    pub is_replay: bool,
    pub active_replay_index: usize,
    #[serde(default)]
    pub replay_user_messages_stack: Vec<Message>,
    /// Reuse the models recorded on the original messages instead of the
    /// conversation's currently selected model.
    #[serde(default)]
    pub replay_as_is: bool,
}

/// Where a replay conversation stands relative to its stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayProgress {
    NotReplayed,
    PartiallyReplayed,
    FullyReplayed,
}

impl Default for Replay {
    fn default() -> Self {
        Self::inactive()
    }
}

impl Replay {
    /// Metadata of a regular, non-replay conversation.
    pub fn inactive() -> Self {
        Self {
            is_replay: false,
            active_replay_index: 0,
            replay_user_messages_stack: Vec::new(),
            replay_as_is: false,
        }
    }

    /// Starts a replay over `stack` at index 0.
    pub fn start(stack: Vec<Message>, replay_as_is: bool) -> Self {
        Self {
            is_replay: true,
            active_replay_index: 0,
            replay_user_messages_stack: stack,
            replay_as_is,
        }
    }

    /// An exhausted stack is fully replayed, including an empty one.
    pub fn progress(&self) -> ReplayProgress {
        if !self.is_replay {
            ReplayProgress::NotReplayed
        } else if self.is_finished() {
            ReplayProgress::FullyReplayed
        } else if self.active_replay_index == 0 {
            ReplayProgress::NotReplayed
        } else {
            ReplayProgress::PartiallyReplayed
        }
    }

    pub fn is_finished(&self) -> bool {
        self.active_replay_index >= self.replay_user_messages_stack.len()
    }

    /// The stacked message that will be sent next, if any.
    pub fn next_message(&self) -> Option<&Message> {
        self.replay_user_messages_stack.get(self.active_replay_index)
    }

    /// Moves past the current stack entry and returns it.
    pub fn advance(&mut self) -> Result<Message> {
        if !self.is_replay {
            return Err(ChatseedError::invalid_state(
                "conversation is not a replay conversation",
            ));
        }
        let message = self.next_message().cloned().ok_or_else(|| {
            ChatseedError::invalid_state(format!(
                "replay already finished at index {}",
                self.active_replay_index
            ))
        })?;
        self.active_replay_index += 1;
        Ok(message)
    }
}
