//! MessagePusher trait 定義
//!
//! チャンネルへの通知（push）のインターフェース。
//! WebSocket などの具体的な送信手段は Infrastructure 層が実装します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ChannelId, MessagePushError, Notification};

/// Outbound queue of one channel. Frames are already-encoded text.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// 送信はノンブロッキングで、遅いチャンネルが他のチャンネルへの配送を止めることはない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// チャンネルの送信キューを登録
    async fn register_client(&self, channel_id: ChannelId, sender: PusherChannel);

    /// チャンネルの送信キューを登録解除
    async fn unregister_client(&self, channel_id: &ChannelId);

    /// 特定のチャンネルに通知を送信
    async fn push_to(
        &self,
        channel_id: &ChannelId,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// 複数のチャンネルに通知を送信
    ///
    /// 切断済みのチャンネルは警告を出してスキップし、エラーにはしない。
    async fn broadcast(
        &self,
        targets: Vec<ChannelId>,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;
}
