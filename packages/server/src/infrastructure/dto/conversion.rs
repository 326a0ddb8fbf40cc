//! Conversion logic from domain entities to DTOs.

use hiroba_shared::time::timestamp_to_iso8601;

use crate::domain::{ChatMessage, Notification, Participant};
use crate::infrastructure::dto::websocket::{
    ChatMessageDto, ParticipantDto, ProtocolError, ServerEvent,
};

impl From<&Participant> for ParticipantDto {
    fn from(model: &Participant) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            name: model.name.as_str().to_string(),
            connected_at: timestamp_to_iso8601(model.connected_at.value()),
        }
    }
}

impl From<&ChatMessage> for ChatMessageDto {
    fn from(model: &ChatMessage) -> Self {
        Self {
            id: model.from.as_str().to_string(),
            name: model.name.as_str().to_string(),
            message: model.content.as_str().to_string(),
            timestamp: timestamp_to_iso8601(model.timestamp.value()),
        }
    }
}

impl From<&Notification> for ServerEvent {
    fn from(notification: &Notification) -> Self {
        match notification {
            Notification::SystemNotice(text) => Self::SystemNotice(text.clone()),
            Notification::ChatMessage(message) => Self::ChatMessage(message.into()),
            Notification::RosterSnapshot(participants) => {
                Self::RosterSnapshot(participants.iter().map(ParticipantDto::from).collect())
            }
        }
    }
}

/// Encode a notification into the text frame sent over the WebSocket
pub fn encode_notification(notification: &Notification) -> Result<String, ProtocolError> {
    ServerEvent::from(notification).encode()
}
