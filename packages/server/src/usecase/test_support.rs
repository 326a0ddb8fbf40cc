//! Shared fixtures for the use case tests.

use std::sync::Arc;

use hiroba_shared::{
    protocol::ServerEvent,
    time::{FixedClock, MonotonicClock},
};
use tokio::sync::mpsc;

use crate::{
    domain::{
        ChannelId, DisplayName, FixedNameGenerator, MessagePusher, Participant, RosterRepository,
        Timestamp,
    },
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryRosterRepository,
    },
};

use super::{BroadcastBus, EventSequencer};

pub const FIXED_NOW: i64 = 1672531200000;

pub struct TestHarness {
    pub repository: Arc<InMemoryRosterRepository>,
    pub message_pusher: Arc<WebSocketMessagePusher>,
    pub bus: Arc<BroadcastBus>,
    pub sequencer: Arc<EventSequencer>,
    pub clock: Arc<MonotonicClock<FixedClock>>,
    pub names: Arc<FixedNameGenerator>,
}

impl TestHarness {
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryRosterRepository::default());
        let message_pusher = Arc::new(WebSocketMessagePusher::default());
        let bus = Arc::new(BroadcastBus::new(
            repository.clone(),
            message_pusher.clone(),
        ));
        Self {
            repository,
            message_pusher,
            bus,
            sequencer: Arc::new(EventSequencer::new()),
            clock: Arc::new(MonotonicClock::new(FixedClock::new(FIXED_NOW))),
            names: Arc::new(FixedNameGenerator::new("HappyTiger1")),
        }
    }

    /// Put a participant straight into the roster and pusher, bypassing the
    /// connect use case.
    pub async fn join_without_usecase(
        &self,
        id: &str,
        name: &str,
    ) -> mpsc::UnboundedReceiver<String> {
        let channel_id = ChannelId::new(id.to_string()).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        self.message_pusher
            .register_client(channel_id.clone(), tx)
            .await;
        self.repository
            .add_participant(Participant::new(
                channel_id,
                DisplayName::new(name),
                Timestamp::new(FIXED_NOW),
            ))
            .await
            .unwrap();
        rx
    }

    /// Receive the next frame and decode it
    pub async fn next_event(rx: &mut mpsc::UnboundedReceiver<String>) -> ServerEvent {
        let frame = rx.recv().await.expect("channel closed");
        ServerEvent::decode(&frame).expect("server sent a malformed frame")
    }

    /// Receive the next frame, which must be a roster snapshot, and return its ids
    pub async fn expect_roster(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
        match Self::next_event(rx).await {
            ServerEvent::RosterSnapshot(participants) => {
                participants.into_iter().map(|p| p.id).collect()
            }
            other => panic!("expected a user list, got {:?}", other),
        }
    }

    /// Drain everything currently queued
    pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            events.push(ServerEvent::decode(&frame).expect("server sent a malformed frame"));
        }
        events
    }
}
