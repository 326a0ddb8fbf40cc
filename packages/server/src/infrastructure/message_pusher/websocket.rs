//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - WebSocket セッションの送信キュー（`UnboundedSender`）を管理
//! - 通知をフレームにエンコードし、チャンネルへ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui::session`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 送信キューは無制限なので、送信が相手の受信速度を待つことはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ChannelId, MessagePushError, MessagePusher, Notification, PusherChannel},
    infrastructure::dto::conversion::encode_notification,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new(Arc::new(Mutex::new(HashMap::new())));
///
/// pusher.register_client(channel_id.clone(), tx).await;
/// pusher.push_to(&channel_id, &Notification::SystemNotice("hello".into())).await?;
/// ```
pub struct WebSocketMessagePusher {
    /// 接続中のチャンネルの WebSocket sender
    clients: Arc<Mutex<HashMap<ChannelId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<ChannelId, PusherChannel>>>) -> Self {
        Self { clients }
    }

    fn encode(notification: &Notification) -> Result<String, MessagePushError> {
        encode_notification(notification).map_err(|e| MessagePushError::EncodeFailed(e.to_string()))
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, channel_id: ChannelId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Channel '{}' registered to MessagePusher", channel_id);
        clients.insert(channel_id, sender);
    }

    async fn unregister_client(&self, channel_id: &ChannelId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(channel_id).is_some() {
            tracing::debug!("Channel '{}' unregistered from MessagePusher", channel_id);
        }
    }

    async fn push_to(
        &self,
        channel_id: &ChannelId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(notification)?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(channel_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(channel_id.as_str().to_string()))?;
        sender
            .send(frame)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to channel '{}'", channel_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ChannelId>,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(notification)?;
        let clients = self.clients.lock().await;

        for target in targets {
            match clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容（切断済みのチャンネルはスキップ）
                Some(sender) => {
                    if let Err(e) = sender.send(frame.clone()) {
                        tracing::warn!("Failed to push message to channel '{}': {}", target, e);
                    } else {
                        tracing::trace!("Broadcasted message to channel '{}'", target);
                    }
                }
                None => {
                    tracing::warn!("Channel '{}' not found during broadcast, skipping", target);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiroba_shared::protocol::ServerEvent;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - push_to: 特定のチャンネルへの送信
    // - broadcast: 複数チャンネルへの送信
    // - 切断済みチャンネル（未登録・受信側が閉じている）のスキップ
    //
    // 【なぜこのテストが必要か】
    // - 送信失敗は送信者側で回復し、呼び出し元へ伝播させない必要がある
    // ========================================

    fn channel(id: &str) -> ChannelId {
        ChannelId::new(id.to_string()).unwrap()
    }

    fn notice(text: &str) -> Notification {
        Notification::SystemNotice(text.to_string())
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定のチャンネルにエンコード済みフレームを送信できる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher.register_client(channel("alice"), tx).await;

        // when (操作):
        let result = pusher.push_to(&channel("alice"), &notice("Hello")).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let frame = rx.recv().await.unwrap();
        assert_eq!(
            ServerEvent::decode(&frame).unwrap(),
            ServerEvent::SystemNotice("Hello".to_string())
        );
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 未登録のチャンネルへの送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();

        // when (操作):
        let result = pusher.push_to(&channel("nonexistent"), &notice("Hello")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MessagePushError::ClientNotFound("nonexistent".to_string()))
        );
    }

    #[tokio::test]
    async fn test_broadcast_success() {
        // テスト項目: 複数のチャンネルに同じフレームをブロードキャストできる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_client(channel("alice"), tx1).await;
        pusher.register_client(channel("bob"), tx2).await;

        // when (操作):
        let result = pusher
            .broadcast(vec![channel("alice"), channel("bob")], &notice("Broadcast"))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        let frame1 = rx1.recv().await.unwrap();
        let frame2 = rx2.recv().await.unwrap();
        assert_eq!(frame1, frame2);
    }

    #[tokio::test]
    async fn test_broadcast_skips_disconnected_channels() {
        // テスト項目: 未登録・受信側が閉じたチャンネルがあってもブロードキャストは成功する
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel();
        pusher.register_client(channel("alice"), tx1).await;
        pusher.register_client(channel("closed"), tx2).await;
        drop(rx2);

        // when (操作):
        let targets = vec![channel("closed"), channel("nonexistent"), channel("alice")];
        let result = pusher.broadcast(targets, &notice("Broadcast")).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(rx1.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_unregistered_channel_no_longer_receives() {
        // テスト項目: 登録解除したチャンネルには送信されない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher.register_client(channel("alice"), tx).await;

        // when (操作):
        pusher.unregister_client(&channel("alice")).await;
        pusher.unregister_client(&channel("alice")).await;
        let result = pusher.broadcast(vec![channel("alice")], &notice("x")).await;

        // then (期待する結果): sender が破棄されたので受信側は閉じている
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, None);
    }
}
