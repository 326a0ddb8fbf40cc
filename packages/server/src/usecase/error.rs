//! UseCase error types.

use thiserror::Error;

/// Errors of `ConnectParticipantUseCase`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// The transport handed out a channel id that is still in the roster
    #[error("channel '{0}' is already connected")]
    DuplicateChannelId(String),
}

/// Errors of `SendMessageUseCase`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("failed to broadcast message: {0}")]
    BroadcastFailed(String),
}
