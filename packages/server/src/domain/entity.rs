//! Entities of the chat domain.

use super::value_object::{ChannelId, DisplayName, MessageContent, Timestamp};

/// One connected participant.
///
/// Created once per connection and never modified afterwards; it only
/// leaves the roster when the channel disconnects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ChannelId,
    pub name: DisplayName,
    pub connected_at: Timestamp,
}

impl Participant {
    pub fn new(id: ChannelId, name: DisplayName, connected_at: Timestamp) -> Self {
        Self {
            id,
            name,
            connected_at,
        }
    }
}

/// A chat message relayed to the room. Exists only for one broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub from: ChannelId,
    pub name: DisplayName,
    pub content: MessageContent,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(
        from: ChannelId,
        name: DisplayName,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            from,
            name,
            content,
            timestamp,
        }
    }
}

/// What the server pushes to channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Private plain-text notice (welcome message)
    SystemNotice(String),
    /// Chat message relayed to the whole room, sender included
    ChatMessage(ChatMessage),
    /// Full roster after a mutation
    RosterSnapshot(Vec<Participant>),
}

/// Welcome text sent privately to a newly connected channel
pub fn welcome_message(name: &DisplayName) -> String {
    format!("Welcome to the chat {}!", name)
}
