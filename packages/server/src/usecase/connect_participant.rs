//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 名前の割り当て、Roster への追加、user list のブロードキャスト、ウェルカムメッセージ
//!
//! ### なぜこのテストが必要か
//! - Roster への追加は必ずブロードキャストより先に行われる必要がある
//! - ウェルカムメッセージは新規チャンネルだけに届く必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加者の接続
//! - 正常系：既存参加者がいる状態での接続（全員に新しい user list が届く）
//! - 異常系：Roster に残っている channel id での接続試行
//! - 異常系：ウェルカムメッセージの送信失敗（接続自体は成功する）

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ChannelId, MessagePusher, NameGenerator, Participant, PusherChannel, RepositoryError,
    RosterRepository, Timestamp, welcome_message,
};

use super::{BroadcastBus, EventSequencer, error::ConnectError};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RosterRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    broadcast_bus: Arc<BroadcastBus>,
    name_generator: Arc<dyn NameGenerator>,
    clock: Arc<dyn Clock>,
    sequencer: Arc<EventSequencer>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn RosterRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        broadcast_bus: Arc<BroadcastBus>,
        name_generator: Arc<dyn NameGenerator>,
        clock: Arc<dyn Clock>,
        sequencer: Arc<EventSequencer>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            broadcast_bus,
            name_generator,
            clock,
            sequencer,
        }
    }

    /// 参加者接続を実行
    ///
    /// 1. 名前を生成
    /// 2. Roster に参加者を追加
    /// 3. 送信キューを MessagePusher に登録
    /// 4. 新しい user list を全チャンネル（新規チャンネルを含む）にブロードキャスト
    /// 5. 新規チャンネルだけにウェルカムメッセージを送信
    ///
    /// # Arguments
    ///
    /// * `channel_id` - 接続したチャンネルの ID
    /// * `sender` - チャンネルへのメッセージ送信用キュー
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 接続成功（Roster に追加された参加者）
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(
        &self,
        channel_id: ChannelId,
        sender: PusherChannel,
    ) -> Result<Participant, ConnectError> {
        let _turn = self.sequencer.enter().await;

        let name = self.name_generator.generate();
        let participant = Participant::new(
            channel_id.clone(),
            name,
            Timestamp::new(self.clock.now_millis()),
        );

        if let Err(RepositoryError::DuplicateChannelId(id)) =
            self.repository.add_participant(participant.clone()).await
        {
            return Err(ConnectError::DuplicateChannelId(id));
        }

        self.message_pusher
            .register_client(channel_id.clone(), sender)
            .await;

        if let Err(e) = self.broadcast_bus.broadcast_roster().await {
            tracing::warn!(
                "Failed to broadcast user list after '{}' connected: {}",
                channel_id,
                e
            );
        }

        if let Err(e) = self
            .broadcast_bus
            .send_notice(&channel_id, welcome_message(&participant.name))
            .await
        {
            tracing::warn!("Failed to send welcome message to '{}': {}", channel_id, e);
        }

        Ok(participant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, MessagePushError, MockMessagePusher, Notification};
    use crate::infrastructure::repository::InMemoryRosterRepository;
    use crate::usecase::test_support::{FIXED_NOW, TestHarness};
    use hiroba_shared::{protocol::ServerEvent, time::FixedClock};
    use tokio::sync::mpsc;

    fn create_usecase(harness: &TestHarness) -> ConnectParticipantUseCase {
        ConnectParticipantUseCase::new(
            harness.repository.clone(),
            harness.message_pusher.clone(),
            harness.bus.clone(),
            harness.names.clone(),
            harness.clock.clone(),
            harness.sequencer.clone(),
        )
    }

    fn channel(id: &str) -> ChannelId {
        ChannelId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_connect_participant_success() {
        // テスト項目: 新規参加者が Roster に追加され、名前と接続時刻が割り当てられる
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);

        // when (操作):
        let (tx, _rx) = mpsc::unbounded_channel();
        let result = usecase.execute(channel("A"), tx).await;

        // then (期待する結果):
        let participant = result.unwrap();
        assert_eq!(participant.id, channel("A"));
        assert_eq!(participant.name, DisplayName::new("HappyTiger1"));
        assert_eq!(participant.connected_at, Timestamp::new(FIXED_NOW));
        assert_eq!(harness.repository.count_connected_channels().await, 1);
    }

    #[tokio::test]
    async fn test_new_channel_receives_roster_then_welcome() {
        // テスト項目: 新規チャンネルには自分を含む user list、その後ウェルカムメッセージが届く
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        usecase.execute(channel("A"), tx).await.unwrap();

        // then (期待する結果):
        assert_eq!(TestHarness::expect_roster(&mut rx).await, vec!["A"]);
        assert_eq!(
            TestHarness::next_event(&mut rx).await,
            ServerEvent::SystemNotice("Welcome to the chat HappyTiger1!".to_string())
        );
        assert!(TestHarness::drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_existing_channels_receive_roster_but_not_welcome() {
        // テスト項目: 既存チャンネルには新しい user list だけが届き、ウェルカムメッセージは届かない
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        usecase.execute(channel("A"), tx_a).await.unwrap();
        TestHarness::drain(&mut rx_a);

        // when (操作):
        let (tx_b, _rx_b) = mpsc::unbounded_channel();
        usecase.execute(channel("B"), tx_b).await.unwrap();

        // then (期待する結果):
        let events = TestHarness::drain(&mut rx_a);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            ServerEvent::RosterSnapshot(p) if p.len() == 2 && p[1].id == "B"
        ));
    }

    #[tokio::test]
    async fn test_three_connects_yield_three_entries_without_duplicates() {
        // テスト項目: X, Y, Z の順に接続すると、三回目の user list は重複なく 3 件
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);
        let (tx_x, mut rx_x) = mpsc::unbounded_channel();
        let (tx_y, _rx_y) = mpsc::unbounded_channel();
        let (tx_z, _rx_z) = mpsc::unbounded_channel();

        // when (操作):
        usecase.execute(channel("X"), tx_x).await.unwrap();
        usecase.execute(channel("Y"), tx_y).await.unwrap();
        usecase.execute(channel("Z"), tx_z).await.unwrap();

        // then (期待する結果): X には 3 回の user list とウェルカムメッセージが届く
        let rosters: Vec<Vec<String>> = TestHarness::drain(&mut rx_x)
            .into_iter()
            .filter_map(|event| match event {
                ServerEvent::RosterSnapshot(p) => Some(p.into_iter().map(|p| p.id).collect()),
                _ => None,
            })
            .collect();
        assert_eq!(rosters.len(), 3);
        let mut last = rosters[2].clone();
        last.sort();
        last.dedup();
        assert_eq!(last, vec!["X", "Y", "Z"]);
    }

    #[tokio::test]
    async fn test_connect_with_channel_id_still_in_roster_fails() {
        // テスト項目: Roster に残っている channel id での接続はエラーになり、元の参加者は残る
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);
        let (tx1, _rx1) = mpsc::unbounded_channel();
        usecase.execute(channel("A"), tx1).await.unwrap();

        // when (操作):
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let result = usecase.execute(channel("A"), tx2).await;

        // then (期待する結果):
        assert_eq!(result, Err(ConnectError::DuplicateChannelId("A".to_string())));
        assert_eq!(harness.repository.count_connected_channels().await, 1);
    }

    #[tokio::test]
    async fn test_welcome_push_failure_does_not_fail_connect() {
        // テスト項目: ウェルカムメッセージの送信に失敗しても接続は成功し、Roster に残る
        // given (前提条件):
        let repository = Arc::new(InMemoryRosterRepository::default());
        let mut pusher = MockMessagePusher::new();
        pusher.expect_register_client().times(1).returning(|_, _| ());
        pusher
            .expect_broadcast()
            .withf(|_, notification| matches!(notification, Notification::RosterSnapshot(_)))
            .times(1)
            .returning(|_, _| Ok(()));
        pusher
            .expect_push_to()
            .times(1)
            .returning(|id, _| Err(MessagePushError::ClientNotFound(id.as_str().to_string())));
        let pusher = Arc::new(pusher);
        let bus = Arc::new(BroadcastBus::new(repository.clone(), pusher.clone()));
        let usecase = ConnectParticipantUseCase::new(
            repository.clone(),
            pusher,
            bus,
            Arc::new(crate::domain::FixedNameGenerator::new("KindLion5")),
            Arc::new(FixedClock::new(FIXED_NOW)),
            Arc::new(EventSequencer::new()),
        );

        // when (操作):
        let (tx, _rx) = mpsc::unbounded_channel();
        let result = usecase.execute(channel("A"), tx).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(repository.count_connected_channels().await, 1);
    }
}
