//! Connection manager: owns the single channel of a client instance.
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectionManager::connect() / disconnect() / send()
//! - 接続ガード（同時に進行する接続試行は常に 1 つ）
//! - サーバー側からの切断の検知
//!
//! ### なぜこのテストが必要か
//! - 初期化処理が二重に呼ばれても、接続は 1 本だけでなければならない
//! - 試行中に disconnect() されても、取り消された試行の結果が採用されてはならない
//! - 接続失敗は終端状態で、自動再接続はしない
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続、送信、切断
//! - エッジケース：接続中の二重 connect()、接続済みでの connect()
//! - エッジケース：接続中の disconnect() とその直後の connect()
//! - エッジケース：未接続・切断済みでの disconnect()
//! - 異常系：接続失敗と、その後の明示的な再接続
//! - 異常系：サーバーによる切断

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use hiroba_shared::protocol::ClientEvent;
use tokio::sync::{Mutex, mpsc, watch};

use crate::{
    error::ClientError,
    transport::{ChannelLink, Transport, TransportEvent},
};

/// Observable connection state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Failed(String),
}

/// Internal state of the guard. Attempts are numbered so a result can be
/// matched against the attempt that is still wanted.
enum Slot {
    Idle,
    Connecting(u64),
    Connected { generation: u64, link: ChannelLink },
    Failed(String),
}

/// State shared with the per-link forwarding tasks
struct Shared {
    slot: Mutex<Slot>,
    state_tx: watch::Sender<ConnectionState>,
    inbound_tx: mpsc::UnboundedSender<TransportEvent>,
}

impl Shared {
    fn publish(&self, state: ConnectionState) {
        tracing::debug!("Connection state: {:?}", state);
        self.state_tx.send_replace(state);
    }

    /// Mark the link of `generation` as gone. Returns false when the slot
    /// has already moved on (closed locally or replaced).
    async fn release(&self, generation: u64) -> bool {
        let mut slot = self.slot.lock().await;
        match *slot {
            Slot::Connected { generation: current, .. } if current == generation => {
                *slot = Slot::Idle;
                self.publish(ConnectionState::Disconnected);
                true
            }
            _ => false,
        }
    }
}

pub struct ConnectionManager {
    transport: Arc<dyn Transport>,
    url: String,
    shared: Arc<Shared>,
    /// Held for the whole duration of `Transport::open`
    in_flight: Mutex<()>,
    next_generation: AtomicU64,
}

impl ConnectionManager {
    /// Create a manager for `url`. The returned receiver yields the inbound
    /// frames of the current channel, and `Closed` when the server drops it.
    pub fn new(
        transport: Arc<dyn Transport>,
        url: impl Into<String>,
    ) -> (Self, mpsc::UnboundedReceiver<TransportEvent>) {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (state_tx, _) = watch::channel(ConnectionState::Disconnected);
        let manager = Self {
            transport,
            url: url.into(),
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot::Idle),
                state_tx,
                inbound_tx,
            }),
            in_flight: Mutex::new(()),
            next_generation: AtomicU64::new(1),
        };
        (manager, inbound_rx)
    }

    pub fn state(&self) -> ConnectionState {
        self.shared.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.shared.state_tx.subscribe()
    }

    /// Open the channel unless one is already open or being opened.
    ///
    /// A caller that arrives while an attempt is in flight waits for that
    /// attempt and shares its outcome. A failed attempt is final; calling
    /// `connect()` again starts a fresh one. An attempt cancelled by
    /// `disconnect()` returns `Cancelled` and its channel is closed.
    pub async fn connect(&self) -> Result<(), ClientError> {
        let generation = {
            let mut slot = self.shared.slot.lock().await;
            match *slot {
                Slot::Connected { .. } => return Ok(()),
                Slot::Connecting(_) => None,
                Slot::Idle | Slot::Failed(_) => {
                    let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
                    *slot = Slot::Connecting(generation);
                    self.shared.publish(ConnectionState::Connecting);
                    Some(generation)
                }
            }
        };
        let Some(generation) = generation else {
            return self.wait_for_attempt().await;
        };

        // A cancelled attempt may still be opening; never run two at once
        let _in_flight = self.in_flight.lock().await;
        if !self.is_pending(generation).await {
            return Err(ClientError::Cancelled);
        }

        tracing::debug!("Opening channel to {} (attempt {})", self.url, generation);
        let (link_tx, link_rx) = mpsc::unbounded_channel();
        let result = self.transport.open(&self.url, link_tx).await;

        let mut slot = self.shared.slot.lock().await;
        if !matches!(*slot, Slot::Connecting(current) if current == generation) {
            if let Ok(link) = result {
                link.close();
            }
            return Err(ClientError::Cancelled);
        }

        match result {
            Ok(link) => {
                *slot = Slot::Connected { generation, link };
                self.shared.publish(ConnectionState::Connected);
                drop(slot);
                tokio::spawn(forward_link_events(self.shared.clone(), generation, link_rx));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Connection to {} failed: {}", self.url, e);
                *slot = Slot::Failed(e.to_string());
                self.shared.publish(ConnectionState::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    async fn is_pending(&self, generation: u64) -> bool {
        let slot = self.shared.slot.lock().await;
        matches!(*slot, Slot::Connecting(current) if current == generation)
    }

    async fn wait_for_attempt(&self) -> Result<(), ClientError> {
        let mut state_rx = self.shared.state_tx.subscribe();
        let state = state_rx
            .wait_for(|state| !matches!(state, ConnectionState::Connecting))
            .await
            .map_err(|_| ClientError::Cancelled)?
            .clone();

        match state {
            ConnectionState::Connected => Ok(()),
            ConnectionState::Failed(reason) => Err(ClientError::ConnectionEstablish(reason)),
            ConnectionState::Disconnected | ConnectionState::Connecting => {
                Err(ClientError::Cancelled)
            }
        }
    }

    /// Close the channel if open. Safe to call in any state, any number of times.
    pub async fn disconnect(&self) {
        let mut slot = self.shared.slot.lock().await;
        match std::mem::replace(&mut *slot, Slot::Idle) {
            Slot::Connected { link, .. } => {
                link.close();
                tracing::info!("Disconnected from {}", self.url);
            }
            Slot::Connecting(generation) => {
                tracing::debug!("Cancelled pending connection attempt {}", generation)
            }
            Slot::Idle => {}
            Slot::Failed(reason) => {
                // Keep the failure visible; nothing to close
                *slot = Slot::Failed(reason);
                return;
            }
        }
        self.shared.publish(ConnectionState::Disconnected);
    }

    /// Encode and send one event over the open channel
    pub async fn send(&self, event: &ClientEvent) -> Result<(), ClientError> {
        let frame = event.encode()?;
        let slot = self.shared.slot.lock().await;
        match &*slot {
            Slot::Connected { link, .. } => link.send(frame),
            _ => Err(ClientError::NotConnected),
        }
    }
}

/// Relay the frames of one link to the manager's receiver. When the link
/// ends while it is still the current one, the manager becomes
/// `Disconnected` and `Closed` is relayed once.
async fn forward_link_events(
    shared: Arc<Shared>,
    generation: u64,
    mut link_rx: mpsc::UnboundedReceiver<TransportEvent>,
) {
    while let Some(event) = link_rx.recv().await {
        match event {
            TransportEvent::Frame(frame) => {
                if shared.inbound_tx.send(TransportEvent::Frame(frame)).is_err() {
                    break;
                }
            }
            TransportEvent::Closed => break,
        }
    }

    if shared.release(generation).await {
        tracing::info!("Channel closed by the server");
        let _ = shared.inbound_tx.send(TransportEvent::Closed);
    }
}
