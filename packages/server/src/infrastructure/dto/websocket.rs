//! WebSocket frame DTOs.
//!
//! The frame types are shared with the client, so they live in
//! `hiroba_shared::protocol`.

pub use hiroba_shared::protocol::{
    ChatMessageDto, ClientEvent, ParticipantDto, ProtocolError, ServerEvent,
};
