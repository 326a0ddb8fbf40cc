//! Domain error types.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("channel id must not be empty")]
    EmptyChannelId,
}

/// Roster mutation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// A participant with the same channel id is already in the roster
    #[error("channel '{0}' is already in the roster")]
    DuplicateChannelId(String),
}

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("channel '{0}' is already connected")]
    DuplicateChannelId(String),
}

impl From<RosterError> for RepositoryError {
    fn from(error: RosterError) -> Self {
        match error {
            RosterError::DuplicateChannelId(id) => Self::DuplicateChannelId(id),
        }
    }
}

/// Errors raised while pushing a notification to a channel
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// The channel is not (or no longer) registered
    #[error("channel '{0}' not found")]
    ClientNotFound(String),

    /// The channel's outbound queue is closed
    #[error("failed to push message: {0}")]
    PushFailed(String),

    /// The notification could not be encoded into a frame
    #[error("failed to encode notification: {0}")]
    EncodeFailed(String),
}
