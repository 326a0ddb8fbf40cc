//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - Roster からの削除、送信キューの登録解除、残りの参加者への user list ブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 切断イベントは重複して届くことがあるため、冪等でなければならない
//! - 切断後の user list には切断した参加者が含まれてはならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断と通知
//! - エッジケース：最後の参加者の切断（通知対象なし）
//! - エッジケース：同じ参加者の二重切断、存在しない参加者の切断

use std::sync::Arc;

use crate::domain::{ChannelId, MessagePusher, Participant, RosterRepository};

use super::{BroadcastBus, EventSequencer};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RosterRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    broadcast_bus: Arc<BroadcastBus>,
    sequencer: Arc<EventSequencer>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn RosterRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        broadcast_bus: Arc<BroadcastBus>,
        sequencer: Arc<EventSequencer>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            broadcast_bus,
            sequencer,
        }
    }

    /// 参加者切断を実行
    ///
    /// # Arguments
    ///
    /// * `channel_id` - 切断したチャンネルの ID
    ///
    /// # Returns
    ///
    /// * `Some(Participant)` - Roster から削除した参加者
    /// * `None` - 既に切断済み、または存在しない参加者（Roster は変化せず、通知もしない）
    pub async fn execute(&self, channel_id: &ChannelId) -> Option<Participant> {
        let _turn = self.sequencer.enter().await;

        self.message_pusher.unregister_client(channel_id).await;

        let Some(removed) = self.repository.remove_participant(channel_id).await else {
            tracing::debug!("Channel '{}' was already removed from the roster", channel_id);
            return None;
        };

        if let Err(e) = self.broadcast_bus.broadcast_roster().await {
            tracing::warn!(
                "Failed to broadcast user list after '{}' disconnected: {}",
                channel_id,
                e
            );
        }

        Some(removed)
    }
}
