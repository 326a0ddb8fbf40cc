//! Server state and dependency wiring.

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::{
    domain::{MessagePusher, NameGenerator, RosterRepository},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryRosterRepository,
    },
    usecase::{
        BroadcastBus, ConnectParticipantUseCase, DisconnectParticipantUseCase, EventSequencer,
        GetParticipantsUseCase, RequestUserListUseCase, SendMessageUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// RequestUserListUseCase（user list 要求のユースケース）
    pub request_user_list_usecase: Arc<RequestUserListUseCase>,
    /// GetParticipantsUseCase（参加者一覧取得のユースケース）
    pub get_participants_usecase: Arc<GetParticipantsUseCase>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Wire every use case around one repository, one pusher and one sequencer.
    ///
    /// Initialization order:
    /// 1. Repository
    /// 2. MessagePusher
    /// 3. BroadcastBus and EventSequencer
    /// 4. UseCases
    pub fn new(
        repository: Arc<dyn RosterRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        name_generator: Arc<dyn NameGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let broadcast_bus = Arc::new(BroadcastBus::new(
            repository.clone(),
            message_pusher.clone(),
        ));
        let sequencer = Arc::new(EventSequencer::new());

        Self {
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                broadcast_bus.clone(),
                name_generator,
                clock.clone(),
                sequencer.clone(),
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                repository.clone(),
                message_pusher,
                broadcast_bus.clone(),
                sequencer.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                repository.clone(),
                broadcast_bus.clone(),
                clock.clone(),
                sequencer.clone(),
            )),
            request_user_list_usecase: Arc::new(RequestUserListUseCase::new(
                broadcast_bus,
                sequencer,
            )),
            get_participants_usecase: Arc::new(GetParticipantsUseCase::new(repository)),
            clock,
        }
    }

    /// State backed by the in-memory roster and the WebSocket pusher
    pub fn in_memory(name_generator: Arc<dyn NameGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            Arc::new(InMemoryRosterRepository::default()),
            Arc::new(WebSocketMessagePusher::default()),
            name_generator,
            clock,
        )
    }
}
