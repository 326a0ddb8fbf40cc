//! Error types for the chat client.

use hiroba_shared::protocol::ProtocolError;
use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport could not open the channel. Terminal: no automatic retry.
    #[error("Failed to establish connection: {0}")]
    ConnectionEstablish(String),

    /// The attempt this caller was waiting on was cancelled by `disconnect()`
    #[error("Connection attempt was cancelled")]
    Cancelled,

    #[error("Not connected")]
    NotConnected,

    /// The server closed the channel
    #[error("Connection closed by the server")]
    ConnectionClosed,

    #[error("Failed to send: {0}")]
    Send(String),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
