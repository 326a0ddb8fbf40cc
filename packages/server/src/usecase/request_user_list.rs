//! UseCase: user list 要求処理

use std::sync::Arc;

use crate::domain::{MessagePushError, Participant};

use super::{BroadcastBus, EventSequencer};

/// `request user list` を受け取ったときのユースケース
///
/// 要求したチャンネルだけでなく、全チャンネルに現在の user list を送る。
pub struct RequestUserListUseCase {
    broadcast_bus: Arc<BroadcastBus>,
    sequencer: Arc<EventSequencer>,
}

impl RequestUserListUseCase {
    pub fn new(broadcast_bus: Arc<BroadcastBus>, sequencer: Arc<EventSequencer>) -> Self {
        Self {
            broadcast_bus,
            sequencer,
        }
    }

    /// 現在の Roster を全チャンネルにブロードキャストし、送ったスナップショットを返す
    pub async fn execute(&self) -> Result<Vec<Participant>, MessagePushError> {
        let _turn = self.sequencer.enter().await;
        self.broadcast_bus.broadcast_roster().await
    }
}
