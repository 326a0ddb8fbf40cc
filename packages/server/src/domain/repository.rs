//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ChannelId, Participant, RepositoryError};

/// Roster Repository trait
///
/// 接続中の参加者（Roster）へのインターフェース。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// 参加者を追加
    async fn add_participant(&self, participant: Participant) -> Result<(), RepositoryError>;

    /// 参加者を削除（存在しない場合は `None`、Roster は変化しない）
    async fn remove_participant(&self, channel_id: &ChannelId) -> Option<Participant>;

    /// 参加者を検索
    async fn find_participant(&self, channel_id: &ChannelId) -> Option<Participant>;

    /// 参加者リストを取得（追加順）
    async fn get_participants(&self) -> Vec<Participant>;

    /// 接続中の全ての channel ID を取得
    async fn get_all_connected_channel_ids(&self) -> Vec<ChannelId>;

    /// 接続中のチャンネル数を取得
    async fn count_connected_channels(&self) -> usize;
}
