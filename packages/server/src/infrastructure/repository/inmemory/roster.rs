//! InMemory Roster Repository 実装
//!
//! ドメイン層が定義する RosterRepository trait の具体的な実装。
//! Roster エンティティを `tokio::sync::Mutex` で保護し、プロセス内の唯一の
//! 参加者テーブルとして使用します。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChannelId, Participant, RepositoryError, Roster, RosterRepository};

/// インメモリ Roster Repository 実装
pub struct InMemoryRosterRepository {
    roster: Arc<Mutex<Roster>>,
}

impl InMemoryRosterRepository {
    /// 新しい InMemoryRosterRepository を作成
    pub fn new(roster: Arc<Mutex<Roster>>) -> Self {
        Self { roster }
    }
}

impl Default for InMemoryRosterRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(Roster::new())))
    }
}

#[async_trait]
impl RosterRepository for InMemoryRosterRepository {
    async fn add_participant(&self, participant: Participant) -> Result<(), RepositoryError> {
        let mut roster = self.roster.lock().await;
        roster.add_participant(participant)?;
        Ok(())
    }

    async fn remove_participant(&self, channel_id: &ChannelId) -> Option<Participant> {
        let mut roster = self.roster.lock().await;
        roster.remove_participant(channel_id)
    }

    async fn find_participant(&self, channel_id: &ChannelId) -> Option<Participant> {
        let roster = self.roster.lock().await;
        roster.find(channel_id).cloned()
    }

    async fn get_participants(&self) -> Vec<Participant> {
        let roster = self.roster.lock().await;
        roster.participants().to_vec()
    }

    async fn get_all_connected_channel_ids(&self) -> Vec<ChannelId> {
        let roster = self.roster.lock().await;
        roster.channel_ids()
    }

    async fn count_connected_channels(&self) -> usize {
        let roster = self.roster.lock().await;
        roster.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, Timestamp};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRosterRepository の追加・削除・検索
    //
    // 【なぜこのテストが必要か】
    // - Roster は「誰が接続中か」の唯一の情報源であり、UseCase はこの
    //   Repository 経由でしか Roster を変更しない
    //
    // 【どのようなシナリオをテストするか】
    // 1. 参加者追加の成功ケース
    // 2. 重複した channel id の追加（エラーケース）
    // 3. 存在しない参加者の削除（冪等性）
    // 4. 参加者の検索
    // ========================================

    fn participant(id: &str, name: &str, connected_at: i64) -> Participant {
        Participant::new(
            ChannelId::new(id.to_string()).unwrap(),
            DisplayName::new(name),
            Timestamp::new(connected_at),
        )
    }

    #[tokio::test]
    async fn test_add_participant_success() {
        // テスト項目: 参加者を追加すると roster に反映される
        // given (前提条件):
        let repo = InMemoryRosterRepository::default();

        // when (操作):
        let result = repo
            .add_participant(participant("alice", "HappyFox1", 1000))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(repo.count_connected_channels().await, 1);
        let participants = repo.get_participants().await;
        assert_eq!(participants[0].id.as_str(), "alice");
        assert_eq!(participants[0].name.as_str(), "HappyFox1");
        assert_eq!(participants[0].connected_at, Timestamp::new(1000));
    }

    #[tokio::test]
    async fn test_add_duplicate_participant_fails() {
        // テスト項目: 同じ channel id の参加者を追加するとエラーになる
        // given (前提条件):
        let repo = InMemoryRosterRepository::default();
        repo.add_participant(participant("alice", "HappyFox1", 1000))
            .await
            .unwrap();

        // when (操作):
        let result = repo
            .add_participant(participant("alice", "BoldOwl2", 2000))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RepositoryError::DuplicateChannelId("alice".to_string()))
        );
        assert_eq!(repo.count_connected_channels().await, 1);
    }

    #[tokio::test]
    async fn test_remove_nonexistent_participant() {
        // テスト項目: 存在しない参加者を削除しても問題なく処理される（冪等性）
        // given (前提条件):
        let repo = InMemoryRosterRepository::default();
        repo.add_participant(participant("alice", "HappyFox1", 1000))
            .await
            .unwrap();

        // when (操作):
        let nonexistent = ChannelId::new("nonexistent".to_string()).unwrap();
        let removed = repo.remove_participant(&nonexistent).await;

        // then (期待する結果): 何も削除されず、roster は変化しない
        assert_eq!(removed, None);
        assert_eq!(repo.count_connected_channels().await, 1);
    }

    #[tokio::test]
    async fn test_find_and_list_channel_ids() {
        // テスト項目: 参加者の検索と channel id 一覧の取得ができる
        // given (前提条件):
        let repo = InMemoryRosterRepository::default();
        repo.add_participant(participant("alice", "HappyFox1", 1000))
            .await
            .unwrap();
        repo.add_participant(participant("bob", "CalmWolf2", 2000))
            .await
            .unwrap();
        let bob = ChannelId::new("bob".to_string()).unwrap();

        // when (操作):
        let found = repo.find_participant(&bob).await;
        let ids = repo.get_all_connected_channel_ids().await;

        // then (期待する結果):
        assert_eq!(found.map(|p| p.name.into_string()), Some("CalmWolf2".to_string()));
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&bob));
    }
}
