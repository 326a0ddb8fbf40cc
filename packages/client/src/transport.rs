//! Channel transport: opens one bidirectional text channel to the server.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::error::ClientError;

/// What the transport reports back to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// One inbound text frame
    Frame(String),
    /// The channel is gone, either side closed it
    Closed,
}

/// Handle to an open channel.
///
/// Dropping or closing the link closes the channel.
#[derive(Debug)]
pub struct ChannelLink {
    outbound: mpsc::UnboundedSender<String>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl ChannelLink {
    pub fn new(
        outbound: mpsc::UnboundedSender<String>,
        shutdown: Option<oneshot::Sender<()>>,
    ) -> Self {
        Self { outbound, shutdown }
    }

    /// Queue one text frame for sending
    pub fn send(&self, frame: String) -> Result<(), ClientError> {
        self.outbound
            .send(frame)
            .map_err(|_| ClientError::Send("channel is closed".to_string()))
    }

    pub fn close(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            // The pump may already be gone
            let _ = shutdown.send(());
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open a channel to `url`. Inbound frames and the final `Closed` go to `inbound`.
    /// Dropping `inbound` without sending `Closed` also counts as closed.
    async fn open(
        &self,
        url: &str,
        inbound: mpsc::UnboundedSender<TransportEvent>,
    ) -> Result<ChannelLink, ClientError>;
}

/// WebSocket transport on `tokio-tungstenite`
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketTransport;

#[async_trait]
impl Transport for WebSocketTransport {
    async fn open(
        &self,
        url: &str,
        inbound: mpsc::UnboundedSender<TransportEvent>,
    ) -> Result<ChannelLink, ClientError> {
        let (ws_stream, _response) = connect_async(url)
            .await
            .map_err(|e| ClientError::ConnectionEstablish(e.to_string()))?;
        tracing::info!("Connected to {}", url);

        let (mut write, mut read) = ws_stream.split();
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<String>();
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        // Pump frames both ways until either side closes
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    frame = outbound_rx.recv() => match frame {
                        Some(frame) => {
                            if let Err(e) = write.send(Message::Text(frame.into())).await {
                                tracing::warn!("WebSocket write error: {}", e);
                                break;
                            }
                        }
                        None => {
                            let _ = write.close().await;
                            break;
                        }
                    },
                    incoming = read.next() => match incoming {
                        Some(Ok(Message::Text(text))) => {
                            if inbound.send(TransportEvent::Frame(text.to_string())).is_err() {
                                break;
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            tracing::info!("Server closed the connection");
                            break;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            tracing::warn!("WebSocket read error: {}", e);
                            break;
                        }
                    },
                    _ = &mut shutdown_rx => {
                        let _ = write.close().await;
                        break;
                    }
                }
            }
            let _ = inbound.send(TransportEvent::Closed);
        });

        Ok(ChannelLink::new(outbound_tx, Some(shutdown_tx)))
    }
}
