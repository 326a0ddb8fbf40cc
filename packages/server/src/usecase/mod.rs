//! UseCase layer: the connection manager operations and the broadcast bus.
//!
//! | event                       | use case                         |
//! |-----------------------------|----------------------------------|
//! | channel connected           | `ConnectParticipantUseCase`      |
//! | `chat message` received     | `SendMessageUseCase`             |
//! | `request user list` received| `RequestUserListUseCase`         |
//! | channel disconnected        | `DisconnectParticipantUseCase`   |
//!
//! Every use case that mutates or announces the roster runs inside the
//! shared [`EventSequencer`], so "mutate, then broadcast" is one step.

mod broadcast;
mod connect_participant;
mod disconnect_participant;
mod error;
mod get_participants;
mod request_user_list;
mod send_message;
mod sequencer;

#[cfg(test)]
mod test_support;

pub use broadcast::BroadcastBus;
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, SendMessageError};
pub use get_participants::GetParticipantsUseCase;
pub use request_user_list::RequestUserListUseCase;
pub use send_message::SendMessageUseCase;
pub use sequencer::EventSequencer;
