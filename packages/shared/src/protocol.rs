//! Wire protocol carried over each WebSocket channel.
//!
//! Every text frame is one JSON envelope `{"event": <name>, "data": <payload>}`.
//!
//! | event               | direction        | payload                              |
//! |---------------------|------------------|--------------------------------------|
//! | `chat message`      | client → server  | string                               |
//! | `chat message`      | server → client  | string (system notice) or message    |
//! | `user list`         | server → client  | array of participants                |
//! | `request user list` | client → server  | none                                 |
//!
//! Frames are decoded once at the boundary into [`ClientEvent`] or
//! [`ServerEvent`] and matched exhaustively afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CHAT_MESSAGE_EVENT: &str = "chat message";
pub const USER_LIST_EVENT: &str = "user list";
pub const REQUEST_USER_LIST_EVENT: &str = "request user list";

/// Sender id used for system notices in the client message log
pub const SYSTEM_SENDER_ID: &str = "system";

/// Errors raised while encoding or decoding an envelope
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The frame is not valid JSON or does not match any known event shape
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

/// A participant as it appears in a `user list` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub id: String,
    pub name: String,
    /// ISO 8601 UTC
    pub connected_at: String,
}

/// A relayed chat message as it appears in a `chat message` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub message: String,
    /// ISO 8601 UTC
    pub timestamp: String,
}

/// Events sent from a client to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "chat message")]
    ChatMessage(String),
    #[serde(rename = "request user list")]
    RequestUserList,
}

impl ClientEvent {
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(frame)?)
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Events sent from the server to a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// Plain text notice, e.g. the welcome message
    SystemNotice(String),
    /// A chat message relayed from a participant (possibly the receiver itself)
    ChatMessage(ChatMessageDto),
    /// Full roster, replaces whatever the client held before
    RosterSnapshot(Vec<ParticipantDto>),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ChatPayload {
    Notice(String),
    Message(ChatMessageDto),
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
enum ServerEnvelope {
    #[serde(rename = "chat message")]
    ChatMessage(ChatPayload),
    #[serde(rename = "user list")]
    UserList(Vec<ParticipantDto>),
}

impl From<ServerEnvelope> for ServerEvent {
    fn from(envelope: ServerEnvelope) -> Self {
        match envelope {
            ServerEnvelope::ChatMessage(ChatPayload::Notice(text)) => Self::SystemNotice(text),
            ServerEnvelope::ChatMessage(ChatPayload::Message(message)) => {
                Self::ChatMessage(message)
            }
            ServerEnvelope::UserList(participants) => Self::RosterSnapshot(participants),
        }
    }
}

impl From<ServerEvent> for ServerEnvelope {
    fn from(event: ServerEvent) -> Self {
        match event {
            ServerEvent::SystemNotice(text) => Self::ChatMessage(ChatPayload::Notice(text)),
            ServerEvent::ChatMessage(message) => Self::ChatMessage(ChatPayload::Message(message)),
            ServerEvent::RosterSnapshot(participants) => Self::UserList(participants),
        }
    }
}

impl ServerEvent {
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        let envelope: ServerEnvelope = serde_json::from_str(frame)?;
        Ok(envelope.into())
    }

    pub fn encode(self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(&ServerEnvelope::from(self))?)
    }
}
