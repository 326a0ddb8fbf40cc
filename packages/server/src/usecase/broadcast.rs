//! Broadcast Bus: fans notifications out to every connected channel.
//!
//! The room is the whole server; the recipients of a broadcast are exactly
//! the channels in the roster at the time of the call.

use std::sync::Arc;

use crate::domain::{
    ChannelId, ChatMessage, MessagePushError, MessagePusher, Notification, Participant,
    RosterRepository,
};

pub struct BroadcastBus {
    repository: Arc<dyn RosterRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl BroadcastBus {
    pub fn new(
        repository: Arc<dyn RosterRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Send the current roster as `user list` to every connected channel.
    ///
    /// Must be called after the roster mutation it announces, never before.
    /// Returns the snapshot that was sent.
    pub async fn broadcast_roster(&self) -> Result<Vec<Participant>, MessagePushError> {
        let participants = self.repository.get_participants().await;
        let targets: Vec<ChannelId> = participants.iter().map(|p| p.id.clone()).collect();
        let target_count = targets.len();

        self.message_pusher
            .broadcast(targets, &Notification::RosterSnapshot(participants.clone()))
            .await?;
        tracing::debug!(
            "Broadcasted user list ({} participants) to {} channels",
            participants.len(),
            target_count
        );

        Ok(participants)
    }

    /// Send a chat message to every connected channel, sender included.
    ///
    /// Returns the channels the message was addressed to.
    pub async fn broadcast_message(
        &self,
        message: &ChatMessage,
    ) -> Result<Vec<ChannelId>, MessagePushError> {
        let targets = self.repository.get_all_connected_channel_ids().await;

        self.message_pusher
            .broadcast(targets.clone(), &Notification::ChatMessage(message.clone()))
            .await?;

        Ok(targets)
    }

    /// Send a plain-text notice to a single channel.
    pub async fn send_notice(
        &self,
        channel_id: &ChannelId,
        text: String,
    ) -> Result<(), MessagePushError> {
        self.message_pusher
            .push_to(channel_id, &Notification::SystemNotice(text))
            .await
    }
}
