//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者名の解決、タイムスタンプ付与、送信者を含む全員へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - クライアントにはローカルエコーが無いため、送信者自身にもメッセージが届く必要がある
//! - 同じ送信者のメッセージは送信順に、タイムスタンプが減少しない形で届く必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト
//! - エッジケース：空文字列のメッセージ
//! - エッジケース：Roster に存在しない送信者（名前の代わりに channel id を使う）

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ChannelId, ChatMessage, DisplayName, MessageContent, RosterRepository, Timestamp,
};

use super::{BroadcastBus, EventSequencer, error::SendMessageError};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RosterRepository>,
    broadcast_bus: Arc<BroadcastBus>,
    clock: Arc<dyn Clock>,
    sequencer: Arc<EventSequencer>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn RosterRepository>,
        broadcast_bus: Arc<BroadcastBus>,
        clock: Arc<dyn Clock>,
        sequencer: Arc<EventSequencer>,
    ) -> Self {
        Self {
            repository,
            broadcast_bus,
            clock,
            sequencer,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `from` - メッセージ送信者のチャンネル ID
    /// * `text` - クライアントから届いたテキスト（空文字列もそのまま中継する）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - ブロードキャストしたメッセージ
    /// * `Err(SendMessageError)` - 送信失敗
    pub async fn execute(
        &self,
        from: ChannelId,
        text: String,
    ) -> Result<ChatMessage, SendMessageError> {
        let _turn = self.sequencer.enter().await;

        let name = match self.repository.find_participant(&from).await {
            Some(participant) => participant.name,
            None => {
                tracing::warn!(
                    "Sender '{}' is not in the roster, using the channel id as its name",
                    from
                );
                DisplayName::new(from.as_str())
            }
        };

        let message = ChatMessage::new(
            from,
            name,
            MessageContent::new(text),
            Timestamp::new(self.clock.now_millis()),
        );

        self.broadcast_bus
            .broadcast_message(&message)
            .await
            .map_err(|e| SendMessageError::BroadcastFailed(e.to_string()))?;

        Ok(message)
    }
}
