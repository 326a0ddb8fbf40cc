//! UseCase: 参加者一覧取得処理（HTTP API 用）

use std::sync::Arc;

use crate::domain::{Participant, RosterRepository};

/// 参加者一覧取得のユースケース
pub struct GetParticipantsUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RosterRepository>,
}

impl GetParticipantsUseCase {
    /// 新しい GetParticipantsUseCase を作成
    pub fn new(repository: Arc<dyn RosterRepository>) -> Self {
        Self { repository }
    }

    /// 接続順の参加者一覧を取得
    pub async fn execute(&self) -> Vec<Participant> {
        self.repository.get_participants().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChannelId;
    use crate::usecase::test_support::TestHarness;

    #[tokio::test]
    async fn test_get_participants_in_connection_order() {
        // テスト項目: 参加者一覧が接続順で取得できる
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = GetParticipantsUseCase::new(harness.repository.clone());
        let _rx_b = harness.join_without_usecase("B", "BoldOwl2").await;
        let _rx_a = harness.join_without_usecase("A", "AmberFox1").await;

        // when (操作):
        let participants = usecase.execute().await;

        // then (期待する結果):
        let ids: Vec<ChannelId> = participants.into_iter().map(|p| p.id).collect();
        assert_eq!(
            ids,
            vec![
                ChannelId::new("B".to_string()).unwrap(),
                ChannelId::new("A".to_string()).unwrap()
            ]
        );
    }

    #[tokio::test]
    async fn test_get_participants_empty() {
        // テスト項目: 参加者がいない場合は空の一覧
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = GetParticipantsUseCase::new(harness.repository.clone());

        // when (操作):
        let participants = usecase.execute().await;

        // then (期待する結果):
        assert!(participants.is_empty());
    }
}
