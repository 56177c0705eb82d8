//! Conversations derived from other conversations.
//!
//! Every function here takes its sources by reference and returns a new
//! conversation built from clones of the source messages. A derived
//! conversation never shares message storage with its source, so mutating one
//! cannot leak into the other.

use crate::generator::{new_id, now_rfc3339};
use chatseed_core::conversation::{Conversation, Message, Playback, Replay};
use chatseed_core::error::{ChatseedError, Result};

pub const REPLAY_PREFIX: &str = "[Replay] ";
pub const PLAYBACK_PREFIX: &str = "[Playback] ";

/// Copy of `source` with a new id and activity date, stripped of any sharing,
/// replay or playback state.
fn derive(source: &Conversation, name: String) -> Conversation {
    let mut derived = source.clone();
    derived.id = new_id();
    derived.name = name;
    derived.last_activity_date = Some(now_rfc3339());
    derived.replay = Some(Replay::inactive());
    derived.playback = None;
    derived.is_shared = None;
    derived
}

/// A replay of `source` that has not sent anything yet: the user messages are
/// staged, the message list is empty.
pub fn prepare_default_replay_conversation(source: &Conversation) -> Conversation {
    let mut replay = derive(source, format!("{REPLAY_PREFIX}{}", source.name));
    replay.messages = Vec::new();
    replay.replay = Some(Replay::start(source.user_messages(), true));
    replay
}

/// A replay stopped after `replayed_count` request/response pairs. The stack
/// still holds every user message of the source.
pub fn prepare_partially_replayed_conversation(source: &Conversation, replayed_count: usize) -> Result<Conversation> {
    let user_count = source.user_message_count();
    if replayed_count > user_count {
        return Err(ChatseedError::invalid_input(format!(
            "cannot replay {replayed_count} of {user_count} user messages"
        )));
    }

    // Everything before the first user message that has not been replayed.
    let end = source
        .messages
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_user())
        .nth(replayed_count)
        .map_or(source.messages.len(), |(index, _)| index);

    let mut replay = prepare_default_replay_conversation(source);
    replay.messages = source.messages[..end].to_vec();
    if let Some(state) = replay.replay.as_mut() {
        state.active_replay_index = replayed_count;
    }
    Ok(replay)
}

/// Sends the next staged user message and records `response` as the answer.
pub fn proceed_replaying(conversation: &Conversation, response: &str) -> Result<Conversation> {
    let mut next = conversation.clone();
    let state = next
        .replay
        .as_mut()
        .ok_or_else(|| ChatseedError::invalid_state("conversation has no replay state"))?;
    let replay_as_is = state.replay_as_is;
    let request = state.advance()?;

    let model = if replay_as_is {
        request.model.clone().unwrap_or_else(|| next.model.clone())
    } else {
        next.model.clone()
    };
    let mut request = request;
    if !replay_as_is {
        request.model = Some(model.clone());
    }

    next.messages.push(request);
    next.messages.push(Message::assistant(response).with_model(model));
    next.last_activity_date = Some(now_rfc3339());
    Ok(next)
}

/// Proceeds until every staged message has been replayed.
pub fn replay_to_end(conversation: &Conversation, response: &str) -> Result<Conversation> {
    let mut current = conversation.clone();
    while current.replay.as_ref().is_some_and(|r| r.is_replay && !r.is_finished()) {
        current = proceed_replaying(&current, response)?;
    }
    Ok(current)
}

/// A playback of `source` with the first `playback_index` messages (default 0)
/// visible.
pub fn prepare_default_playback_conversation(
    source: &Conversation,
    playback_index: Option<usize>,
) -> Result<Conversation> {
    let index = playback_index.unwrap_or(0);
    let playback_state = Playback::start_at(source.messages.clone(), index)?;

    let mut playback = derive(source, format!("{PLAYBACK_PREFIX}{}", source.name));
    playback.messages = playback_state.visible_messages().to_vec();
    playback.playback = Some(playback_state);
    Ok(playback)
}

/// Concatenates the messages of `conversations` (in order) into a copy of the
/// last one. None of the inputs is modified.
pub fn prepare_history_conversation(conversations: &[Conversation]) -> Result<Conversation> {
    let last = conversations
        .last()
        .ok_or_else(|| ChatseedError::invalid_input("history needs at least one conversation"))?;
    let mut merged = last.clone();
    merged.messages = conversations
        .iter()
        .flat_map(|c| c.messages.iter().cloned())
        .collect();
    Ok(merged)
}
