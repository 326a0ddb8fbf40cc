//! Session: binds one WebSocket to one channel id for its whole lifetime.
//!
//! ```text
//! WebSocket ──recv──> receive_loop ──> ClientEvent ──> use cases
//! WebSocket <──send── pusher_loop  <── mpsc queue  <── MessagePusher
//! ```
//!
//! When either loop ends the other is aborted and the channel is
//! disconnected exactly once.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::ChannelId, infrastructure::dto::websocket::ClientEvent, ui::state::AppState,
};

pub struct Session {
    channel_id: ChannelId,
    state: Arc<AppState>,
}

impl Session {
    pub fn new(channel_id: ChannelId, state: Arc<AppState>) -> Self {
        Self { channel_id, state }
    }

    /// Drive the session until the socket closes, then disconnect the channel.
    pub async fn run(self, socket: WebSocket) {
        let (tx, rx) = mpsc::unbounded_channel();

        // The roster snapshot and welcome notice are queued on `tx` and
        // flushed once the pusher loop starts.
        let participant = match self
            .state
            .connect_participant_usecase
            .execute(self.channel_id.clone(), tx)
            .await
        {
            Ok(participant) => participant,
            Err(e) => {
                tracing::warn!("Rejecting channel '{}': {}", self.channel_id, e);
                return;
            }
        };
        tracing::info!(
            "Channel '{}' connected as '{}'",
            self.channel_id,
            participant.name
        );

        let (sender, receiver) = socket.split();
        let session = Arc::new(self);

        let mut send_task = pusher_loop(rx, sender);
        let mut recv_task = tokio::spawn(receive_loop(receiver, session.clone()));

        // If any one of the tasks completes, abort the other
        tokio::select! {
            _ = &mut recv_task => send_task.abort(),
            _ = &mut send_task => recv_task.abort(),
        };

        match session
            .state
            .disconnect_participant_usecase
            .execute(&session.channel_id)
            .await
        {
            Some(removed) => tracing::info!(
                "Channel '{}' ('{}') disconnected",
                removed.id,
                removed.name
            ),
            None => tracing::debug!("Channel '{}' was already disconnected", session.channel_id),
        }
    }

    /// Handle one inbound text frame. Malformed frames are logged and dropped.
    pub async fn handle_frame(&self, frame: &str) {
        let event = match ClientEvent::decode(frame) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(
                    "Ignoring malformed frame from '{}': {}",
                    self.channel_id,
                    e
                );
                return;
            }
        };

        match event {
            ClientEvent::ChatMessage(text) => {
                if let Err(e) = self
                    .state
                    .send_message_usecase
                    .execute(self.channel_id.clone(), text)
                    .await
                {
                    tracing::warn!("Failed to send message from '{}': {}", self.channel_id, e);
                }
            }
            ClientEvent::RequestUserList => {
                if let Err(e) = self.state.request_user_list_usecase.execute().await {
                    tracing::warn!(
                        "Failed to answer user list request from '{}': {}",
                        self.channel_id,
                        e
                    );
                }
            }
        }
    }
}

/// Forward queued frames to the socket until the queue closes or the peer goes away.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn receive_loop(mut receiver: SplitStream<WebSocket>, session: Arc<Session>) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket error on '{}': {}", session.channel_id, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                tracing::debug!("Received from '{}': {}", session.channel_id, text.as_str());
                session.handle_frame(text.as_str()).await;
            }
            Message::Binary(_) => {
                tracing::warn!("Ignoring binary frame from '{}'", session.channel_id);
            }
            Message::Close(_) => {
                tracing::info!("Channel '{}' requested close", session.channel_id);
                break;
            }
            // Ping/pong is handled automatically by the WebSocket protocol
            _ => {}
        }
    }
}
